pub mod create;
pub mod home;
pub mod not_found;
pub mod playground;
pub mod results;
pub mod sign_in;

use crate::auth::{use_auth, use_identity};
use client::{evaluate, GuardDecision};
use dioxus::prelude::*;
use shared_types::CaseId;

use create::CreateCase;
use home::Home;
use not_found::NotFound;
use playground::Playground;
use results::CaseResults;
use sign_in::{SignIn, SignUp};

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/sign-in")]
    SignIn {},
    #[route("/sign-up")]
    SignUp {},
    #[layout(AuthGuard)]
        #[layout(AppLayout)]
            #[route("/")]
            Home {},
            #[route("/cases/create")]
            CreateCase {},
            #[route("/cases/:id/results")]
            CaseResults { id: CaseId },
            #[route("/playground")]
            Playground {},
        #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Renders protected routes only once the identity allows it.
#[component]
fn AuthGuard() -> Element {
    let auth = use_auth();
    let identity = auth.identity.read().clone();

    match evaluate(auth.kind, &identity) {
        GuardDecision::Render => rsx! { Outlet::<Route> {} },
        GuardDecision::Loading => rsx! {
            div { class: "auth-guard-loading",
                p { "Loading..." }
            }
        },
        GuardDecision::Redirect(path) => {
            tracing::debug!(to = path, "Not signed in, redirecting");
            navigator().push(Route::SignIn {});
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting to sign in..." }
                }
            }
        }
    }
}

/// Header with navigation and the current user.
#[component]
fn AppLayout() -> Element {
    let auth = use_auth();
    let identity = use_identity();
    let user = auth.user_id();

    let handle_sign_out = move |_| {
        let identity = identity.clone();
        spawn(async move {
            identity.sign_out().await;
        });
    };

    rsx! {
        header { class: "app-header",
            nav {
                Link { to: Route::Home {}, "Cases" }
                Link { to: Route::Playground {}, "Playground" }
            }
            div { class: "app-user",
                if auth.is_enabled() {
                    if let Some(user) = user {
                        span { class: "muted", "{user}" }
                    }
                    button { onclick: handle_sign_out, "Sign out" }
                } else {
                    span { class: "muted", "Guest" }
                }
            }
        }
        main { Outlet::<Route> {} }
    }
}
