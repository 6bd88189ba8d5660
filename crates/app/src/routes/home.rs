use dioxus::prelude::*;
use shared_types::{Case, CaseId};

use crate::hooks::{use_case_list, use_delete_case};
use crate::routes::Route;

#[component]
pub fn Home() -> Element {
    let cases = use_case_list();
    let deleter = use_delete_case();
    let mut choosing_type = use_signal(|| false);

    let list_signal = cases.state().signal();
    let list = list_signal.read().clone();
    let delete_signal = deleter.state().signal();
    let delete_state = delete_signal.read().clone();

    let retry = {
        let cases = cases.clone();
        move |_| {
            let cases = cases.clone();
            spawn(async move {
                cases.refetch().await;
            });
        }
    };

    let on_delete = use_callback(move |case_id: CaseId| {
        let deleter = deleter.clone();
        let cases = cases.clone();
        spawn(async move {
            if deleter.delete_case_by_id(case_id).await {
                cases.refetch().await;
            }
        });
    });

    rsx! {
        div { class: "container",
            div { class: "case-row",
                h1 { "Cases" }
                button {
                    class: "primary",
                    onclick: move |_| choosing_type.toggle(),
                    "New Case"
                }
            }

            if choosing_type() {
                CaseTypeChooser {}
            }

            if let Some(err) = &delete_state.error {
                div { class: "error-message", "{err}" }
            }

            if list.loading && list.data.is_empty() {
                p { class: "muted", "Loading cases..." }
            } else if let Some(err) = &list.error {
                div { class: "card",
                    div { class: "error-message", "{err}" }
                    button { onclick: retry, "Retry" }
                }
            } else if list.data.is_empty() {
                div { class: "card",
                    p { class: "muted", "No cases yet. Create one to get started." }
                }
            } else {
                for case in list.data.iter() {
                    CaseRow {
                        key: "{case.id}",
                        case: case.clone(),
                        deleting: delete_state.loading,
                        on_delete,
                    }
                }
            }
        }
    }
}

#[component]
fn CaseRow(case: Case, deleting: bool, on_delete: EventHandler<CaseId>) -> Element {
    let case_id = case.id;

    rsx! {
        div { class: "card case-row",
            div {
                h3 { "{case.title}" }
                p { class: "muted", "{case.case_background}" }
            }
            div {
                Link { to: Route::CaseResults { id: case_id }, class: "button", "Results" }
                button {
                    class: "danger",
                    disabled: deleting,
                    onclick: move |_| on_delete.call(case_id),
                    if deleting { "Deleting..." } else { "Delete" }
                }
            }
        }
    }
}

/// Which side of the case the user is preparing. Only the defense flow
/// exists so far.
#[component]
fn CaseTypeChooser() -> Element {
    rsx! {
        div { class: "card case-type-chooser",
            Link { to: Route::CreateCase {}, class: "button primary",
                h3 { "Defense" }
                p { "Prepare arguments for the defense." }
            }
            button { disabled: true,
                h3 { "Prosecution" }
                p { class: "muted", "Coming soon" }
            }
        }
    }
}
