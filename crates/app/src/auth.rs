use client::IdentityContext;
use dioxus::prelude::*;
use shared_types::{AuthKind, Identity};

/// Global authentication state. `identity` mirrors the adapter and is the
/// reactive source the route guard and layout read from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub kind: AuthKind,
    pub identity: Signal<Identity>,
}

impl AuthState {
    pub fn new(kind: AuthKind, initial: Identity) -> Self {
        Self {
            kind,
            identity: Signal::new(initial),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.kind == AuthKind::Enabled
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.read().is_authenticated
    }

    pub fn user_id(&self) -> Option<String> {
        self.identity.read().user_id.clone()
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// Hook to access the identity adapter, for token-free actions like
/// sign-out or reloading the session.
pub fn use_identity() -> IdentityContext {
    use_context::<IdentityContext>()
}

/// Start the identity adapter and copy every identity change into
/// `auth.identity`. Subscribes before starting so no update is missed.
pub fn use_identity_sync(identity: IdentityContext, auth: AuthState) {
    use_hook(move || {
        let mut rx = identity.subscribe();
        let mut current = auth.identity;

        spawn(async move {
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                tracing::debug!(
                    authenticated = next.is_authenticated,
                    loading = next.is_loading,
                    "Identity changed"
                );
                current.set(next);
            }
        });

        spawn(async move {
            identity.start().await;
        });
    });
}
