use async_trait::async_trait;
use shared_types::Identity;
use tokio::sync::watch;

use super::IdentityProvider;

/// Identity used when authentication is disabled: always signed in as the
/// configured guest id, never loading, never holding a token.
pub struct GuestIdentity {
    state: watch::Sender<Identity>,
}

impl GuestIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        let (state, _) = watch::channel(Identity::guest(user_id));
        Self { state }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for GuestIdentity {
    fn identity(&self) -> Identity {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Identity> {
        self.state.subscribe()
    }

    async fn get_token(&self) -> Option<String> {
        None
    }
}
