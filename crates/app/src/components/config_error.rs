use dioxus::prelude::*;

/// Full-screen blocking message shown when startup configuration is unusable.
#[component]
pub fn ConfigurationError(message: String) -> Element {
    rsx! {
        div { class: "config-error-page",
            div { class: "config-error-card",
                h1 { class: "config-error-title", "Configuration Error" }
                p { class: "config-error-message", "{message}" }
                p { class: "config-error-hint",
                    "Set "
                    code { "AUTH_PUBLISHABLE_KEY" }
                    " or disable authentication with "
                    code { "AUTH_ENABLED=false" }
                    ", then reload."
                }
            }
        }
    }
}
