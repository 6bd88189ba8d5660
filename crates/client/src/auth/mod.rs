//! Identity provider adapter.
//!
//! Presents one interface for "who is the current user and how do I prove
//! it" regardless of whether hosted authentication is configured. The
//! variant is chosen once at startup by [`IdentityContext::from_config`]
//! and the resulting context is passed explicitly to every consumer.

pub mod frontend_api;
pub mod guest;
pub mod hosted;

use std::rc::Rc;

use async_trait::async_trait;
use shared_types::{AuthConfig, AuthKind, AuthMode, ConfigError, Identity};
use tokio::sync::watch;

pub use frontend_api::FrontendApiSession;
pub use guest::GuestIdentity;
pub use hosted::{HostedIdentity, SessionBackend};

/// Failures talking to the identity backend. Never surfaced to views:
/// the adapter logs them and degrades to "no token".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("no active session")]
    NoSession,
    #[error("identity request failed: {0}")]
    Transport(String),
    #[error("identity backend returned HTTP {0}")]
    Status(u16),
    #[error("identity backend returned an unexpected body: {0}")]
    Malformed(String),
}

/// Pages the hosted identity service serves itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostedPage {
    SignIn,
    SignUp,
}

impl HostedPage {
    pub fn path(self) -> &'static str {
        match self {
            HostedPage::SignIn => "sign-in",
            HostedPage::SignUp => "sign-up",
        }
    }
}

/// Capability set every identity variant provides.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Current snapshot.
    fn identity(&self) -> Identity;

    /// Receiver that observes every identity change.
    fn subscribe(&self) -> watch::Receiver<Identity>;

    /// A fresh bearer token, or `None` when none can be obtained.
    async fn get_token(&self) -> Option<String>;

    /// Contact the backend and establish the initial session state.
    async fn start(&self) {}

    /// End the current session, if any.
    async fn sign_out(&self) {}

    /// URL of a hosted page, when the variant has any.
    fn hosted_page_url(&self, _page: HostedPage) -> Option<String> {
        None
    }
}

/// The process-wide identity: the fixed auth mode plus the provider that
/// implements it. Cheap to clone; all clones share one provider.
#[derive(Clone)]
pub struct IdentityContext {
    kind: AuthKind,
    provider: Rc<dyn IdentityProvider>,
}

impl IdentityContext {
    pub fn new(kind: AuthKind, provider: Rc<dyn IdentityProvider>) -> Self {
        Self { kind, provider }
    }

    /// Build the provider matching `mode`.
    pub fn from_mode(mode: &AuthMode, http: reqwest::Client) -> Self {
        match mode {
            AuthMode::Disabled { guest_user_id } => {
                tracing::info!(
                    user_id = %guest_user_id,
                    "Authentication disabled, using guest identity"
                );
                Self::new(
                    AuthKind::Disabled,
                    Rc::new(GuestIdentity::new(guest_user_id.clone())),
                )
            }
            AuthMode::Enabled { frontend_api } => {
                tracing::info!(frontend_api = %frontend_api, "Authentication enabled");
                let session = FrontendApiSession::new(http, frontend_api.clone());
                Self::new(AuthKind::Enabled, Rc::new(HostedIdentity::new(session)))
            }
        }
    }

    /// Resolve the auth mode from configuration and build its provider.
    pub fn from_config(auth: &AuthConfig, http: reqwest::Client) -> Result<Self, ConfigError> {
        let mode = auth.mode().inspect_err(|e| {
            tracing::error!(error = %e, "Invalid authentication configuration");
        })?;
        Ok(Self::from_mode(&mode, http))
    }

    pub fn kind(&self) -> AuthKind {
        self.kind
    }

    pub fn is_enabled(&self) -> bool {
        self.kind == AuthKind::Enabled
    }

    pub fn identity(&self) -> Identity {
        self.provider.identity()
    }

    pub fn subscribe(&self) -> watch::Receiver<Identity> {
        self.provider.subscribe()
    }

    pub async fn get_token(&self) -> Option<String> {
        self.provider.get_token().await
    }

    pub async fn start(&self) {
        self.provider.start().await
    }

    pub async fn sign_out(&self) {
        self.provider.sign_out().await
    }

    pub fn hosted_page_url(&self, page: HostedPage) -> Option<String> {
        self.provider.hosted_page_url(page)
    }
}

impl std::fmt::Debug for IdentityContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityContext")
            .field("kind", &self.kind)
            .field("identity", &self.identity())
            .finish()
    }
}
