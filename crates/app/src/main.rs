use client::config::load_config;
use client::CaseClient;
use dioxus::prelude::*;
use shared_types::ConfigError;

mod auth;
mod components;
mod hooks;
mod routes;

use auth::{use_identity_sync, AuthState};
use components::ConfigurationError;
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

/// Resolve configuration and build the identity plus API client. Runs once.
fn start_services() -> Result<CaseClient, ConfigError> {
    CaseClient::from_config(load_config())
}

#[component]
fn App() -> Element {
    let services = use_hook(start_services);

    // Misconfigured auth blocks the whole app; it never degrades to guest mode.
    let client = match services {
        Ok(client) => client,
        Err(e) => {
            return rsx! {
                document::Link { rel: "stylesheet", href: MAIN_CSS }
                ConfigurationError { message: e.to_string() }
            }
        }
    };

    let identity = client.identity().clone();
    let auth = use_context_provider(|| AuthState::new(identity.kind(), identity.identity()));
    use_context_provider(|| identity.clone());
    use_context_provider(|| client.clone());
    use_identity_sync(identity, auth);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}
