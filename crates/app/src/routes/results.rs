use dioxus::prelude::*;
use shared_types::CaseId;

use crate::hooks::use_case_list;
use crate::routes::Route;

/// Results for one case. There is no single-case endpoint, so the case is
/// looked up in the list.
#[component]
pub fn CaseResults(id: CaseId) -> Element {
    let cases = use_case_list();
    let list_signal = cases.state().signal();
    let list = list_signal.read().clone();
    let case = list.data.iter().find(|c| c.id == id).cloned();

    rsx! {
        div { class: "container",
            div { class: "case-row",
                h1 { "Case Results" }
                Link { to: Route::Home {}, class: "button", "Back to List" }
            }

            div { class: "card",
                p { class: "muted", "Trial #{id}" }
                if let Some(case) = case {
                    h2 { "{case.title}" }
                    p { "{case.case_background}" }
                } else if list.loading {
                    p { class: "muted", "Loading case..." }
                } else if let Some(err) = &list.error {
                    div { class: "error-message", "{err}" }
                } else {
                    p { class: "muted", "This case is not in your list." }
                }
            }
        }
    }
}
