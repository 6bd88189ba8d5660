use client::HostedPage;
use dioxus::prelude::*;

use crate::auth::{use_auth, use_identity};
use crate::routes::Route;

#[component]
pub fn SignIn() -> Element {
    rsx! {
        HostedHandOff { page: HostedPage::SignIn }
    }
}

#[component]
pub fn SignUp() -> Element {
    rsx! {
        HostedHandOff { page: HostedPage::SignUp }
    }
}

/// Sign-in and sign-up happen on the identity service's own pages. This
/// links there and reloads the session once the user comes back.
#[component]
fn HostedHandOff(page: HostedPage) -> Element {
    let auth = use_auth();
    let identity = use_identity();
    let mut checking = use_signal(|| false);

    // Nothing to sign into without hosted auth, and nothing to do once signed in.
    if !auth.is_enabled() || auth.is_authenticated() {
        navigator().replace(Route::Home {});
        return rsx! {};
    }

    let (heading, action, other, other_label) = match page {
        HostedPage::SignIn => (
            "Sign in",
            "Continue to sign in",
            Route::SignUp {},
            "Need an account? Sign up",
        ),
        HostedPage::SignUp => (
            "Create an account",
            "Continue to sign up",
            Route::SignIn {},
            "Have an account? Sign in",
        ),
    };
    let portal = identity.hosted_page_url(page);

    let handle_refresh = move |_| {
        let identity = identity.clone();
        spawn(async move {
            checking.set(true);
            identity.start().await;
            checking.set(false);
        });
    };

    rsx! {
        div { class: "container",
            div { class: "card",
                h1 { "{heading}" }
                if let Some(url) = portal {
                    a { class: "button primary", href: "{url}", "{action}" }
                } else {
                    p { class: "error-message", "The identity service is not reachable." }
                }
                p { class: "muted", "Already finished on the identity page?" }
                button {
                    disabled: checking(),
                    onclick: handle_refresh,
                    if checking() { "Checking..." } else { "Check again" }
                }
                p {
                    Link { to: other, "{other_label}" }
                }
            }
        }
    }
}
