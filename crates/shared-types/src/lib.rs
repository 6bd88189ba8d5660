pub mod case;
pub mod config;
pub mod date_range;
pub mod error;
pub mod identity;

pub use case::*;
pub use config::*;
pub use date_range::*;
pub use error::*;
pub use identity::*;
