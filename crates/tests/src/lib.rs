#[cfg(test)]
mod common;



#[cfg(test)]
mod case_create_tests;

#[cfg(test)]
mod case_delete_tests;

#[cfg(test)]
mod hook_state_tests;
