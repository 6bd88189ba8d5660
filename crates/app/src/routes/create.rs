use dioxus::prelude::*;
use shared_types::{mime_from_filename, parse_arguments, Attachment, CreateCaseRequest};

use crate::hooks::use_create_case;
use crate::routes::Route;

#[component]
pub fn CreateCase() -> Element {
    let creator = use_create_case();

    let mut title = use_signal(String::new);
    let mut background = use_signal(String::new);
    let mut arguments = use_signal(String::new);
    let mut files = use_signal(Vec::<Attachment>::new);
    let mut validation = use_signal(|| None::<String>);

    let create_signal = creator.state().signal();
    let create_state = create_signal.read().clone();

    let handle_files = move |evt: FormEvent| async move {
        let mut picked = Vec::new();
        for f in evt.files() {
            let name = f.name();
            let content_type = f
                .content_type()
                .unwrap_or_else(|| mime_from_filename(&name).to_string());
            match f.read_bytes().await {
                Ok(bytes) => picked.push(
                    Attachment::new(name, bytes.to_vec()).with_content_type(content_type),
                ),
                Err(_) => {
                    tracing::warn!(file = %name, "Failed to read file");
                    validation.set(Some(format!("Failed to read {name}.")));
                }
            }
        }
        files.set(picked);
    };

    let handle_submit = move |evt: Event<FormData>| {
        evt.prevent_default();
        let t = title.read().trim().to_string();
        if t.is_empty() {
            validation.set(Some("Title is required.".to_string()));
            return;
        }
        validation.set(None);

        let request = CreateCaseRequest {
            title: t,
            case_background: background.read().trim().to_string(),
            initial_arguments: parse_arguments(&arguments.read()),
            files: files.read().clone(),
        };

        let creator = creator.clone();
        spawn(async move {
            if let Ok(result) = creator.create_case(&request).await {
                navigator().push(Route::CaseResults {
                    id: result.trial_id,
                });
            }
        });
    };

    let picked_names = files
        .read()
        .iter()
        .map(|f| format!("{} ({} bytes)", f.file_name, f.size()))
        .collect::<Vec<_>>();

    rsx! {
        div { class: "container",
            div { class: "case-row",
                h1 { "New Defense Case" }
                Link { to: Route::Home {}, class: "button", "Back to List" }
            }

            div { class: "card",
                if let Some(err) = validation.read().as_ref() {
                    div { class: "error-message", "{err}" }
                }
                if let Some(err) = &create_state.error {
                    div { class: "error-message", "{err}" }
                }

                form { onsubmit: handle_submit,
                    div { class: "form-group",
                        label { r#for: "title", "Title *" }
                        input {
                            id: "title",
                            value: "{title}",
                            placeholder: "e.g., State v. Smith",
                            oninput: move |evt: FormEvent| title.set(evt.value()),
                        }
                    }

                    div { class: "form-group",
                        label { r#for: "background", "Case background" }
                        textarea {
                            id: "background",
                            rows: 6,
                            value: "{background}",
                            oninput: move |evt: FormEvent| background.set(evt.value()),
                        }
                    }

                    div { class: "form-group",
                        label { r#for: "arguments", "Initial arguments (one per line)" }
                        textarea {
                            id: "arguments",
                            rows: 4,
                            value: "{arguments}",
                            oninput: move |evt: FormEvent| arguments.set(evt.value()),
                        }
                    }

                    div { class: "form-group",
                        label { r#for: "files", "Supporting files" }
                        input {
                            id: "files",
                            r#type: "file",
                            multiple: true,
                            onchange: handle_files,
                        }
                        for name in picked_names {
                            span { class: "muted", "{name}" }
                        }
                    }

                    button {
                        class: "primary",
                        r#type: "submit",
                        disabled: create_state.loading,
                        if create_state.loading { "Creating..." } else { "Create Case" }
                    }
                }
            }
        }
    }
}
