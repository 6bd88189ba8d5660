use async_trait::async_trait;
use shared_types::Identity;
use tokio::sync::watch;

use super::{HostedPage, IdentityError, IdentityProvider};

/// The third-party identity service as seen by the adapter.
///
/// Implementations own the session state and publish every change through
/// [`SessionBackend::subscribe`]; until the first refresh completes the
/// published identity is [`Identity::loading`].
#[async_trait(?Send)]
pub trait SessionBackend {
    fn subscribe(&self) -> watch::Receiver<Identity>;

    /// Load (or reload) the session. Always leaves the backend ready,
    /// signed out if the session could not be determined.
    async fn refresh(&self);

    async fn fetch_token(&self) -> Result<String, IdentityError>;

    async fn sign_out(&self) -> Result<(), IdentityError>;

    fn page_url(&self, _page: HostedPage) -> Option<String> {
        None
    }
}

/// Identity backed by a hosted session. Token failures are logged and
/// reported as "no token" so requests proceed unauthenticated.
pub struct HostedIdentity<B> {
    backend: B,
}

impl<B: SessionBackend> HostedIdentity<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait(?Send)]
impl<B: SessionBackend> IdentityProvider for HostedIdentity<B> {
    fn identity(&self) -> Identity {
        self.backend.subscribe().borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Identity> {
        self.backend.subscribe()
    }

    async fn get_token(&self) -> Option<String> {
        match self.backend.fetch_token().await {
            Ok(token) => Some(token),
            Err(IdentityError::NoSession) => {
                tracing::debug!("No active session, continuing without a token");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error getting token");
                None
            }
        }
    }

    async fn start(&self) {
        self.backend.refresh().await
    }

    async fn sign_out(&self) {
        if let Err(e) = self.backend.sign_out().await {
            tracing::warn!(error = %e, "Sign-out failed");
        }
    }

    fn hosted_page_url(&self, page: HostedPage) -> Option<String> {
        self.backend.page_url(page)
    }
}
