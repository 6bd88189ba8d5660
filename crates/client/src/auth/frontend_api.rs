use std::cell::RefCell;

use async_trait::async_trait;
use serde::Deserialize;
use shared_types::Identity;
use tokio::sync::watch;

use super::{HostedPage, IdentityError, SessionBackend};

// --- Frontend API payloads ---

#[derive(Debug, Deserialize)]
struct ClientEnvelope {
    response: Option<ClientResource>,
}

#[derive(Debug, Deserialize)]
struct ClientResource {
    #[serde(default)]
    sessions: Vec<SessionResource>,
    last_active_session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionResource {
    id: String,
    status: String,
    user: Option<UserResource>,
}

#[derive(Debug, Deserialize)]
struct UserResource {
    id: String,
}

#[derive(Debug, Deserialize)]
struct TokenResource {
    jwt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveSession {
    session_id: String,
    user_id: String,
}

impl ClientResource {
    /// The last active session if it is still active, else the first
    /// active one.
    fn active_session(&self) -> Option<ActiveSession> {
        let active = |s: &&SessionResource| s.status == "active" && s.user.is_some();
        let preferred = self
            .last_active_session_id
            .as_deref()
            .and_then(|id| self.sessions.iter().filter(active).find(|s| s.id == id));
        let session = preferred.or_else(|| self.sessions.iter().find(active))?;
        let user = session.user.as_ref()?;
        Some(ActiveSession {
            session_id: session.id.clone(),
            user_id: user.id.clone(),
        })
    }
}

/// Session backend speaking the hosted identity service's frontend API.
///
/// Browser builds rely on the service's own session cookie, so every
/// request is sent with credentials included.
pub struct FrontendApiSession {
    http: reqwest::Client,
    base_url: String,
    state: watch::Sender<Identity>,
    active: RefCell<Option<ActiveSession>>,
}

impl FrontendApiSession {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let (state, _) = watch::channel(Identity::loading());
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            state,
            active: RefCell::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Origin of the account portal that hosts the sign-in and sign-up
    /// pages. Production instances serve the frontend API at
    /// `clerk.<domain>` and the portal at `accounts.<domain>`; development
    /// instances use `<slug>.clerk.accounts.dev` and `<slug>.accounts.dev`.
    pub fn account_portal(&self) -> String {
        let (scheme, host) = self
            .base_url
            .split_once("://")
            .unwrap_or(("https", self.base_url.as_str()));
        let portal = if let Some(domain) = host.strip_prefix("clerk.") {
            format!("accounts.{domain}")
        } else if let Some(slug) = host.strip_suffix(".clerk.accounts.dev") {
            format!("{slug}.accounts.dev")
        } else {
            host.to_string()
        };
        format!("{scheme}://{portal}")
    }

    fn session_id(&self) -> Option<String> {
        self.active.borrow().as_ref().map(|s| s.session_id.clone())
    }

    fn publish(&self, session: Option<ActiveSession>) {
        let identity = Identity::from_session(session.as_ref().map(|s| s.user_id.clone()));
        *self.active.borrow_mut() = session;
        self.state.send_replace(identity);
    }

    async fn load_client(&self) -> Result<Option<ActiveSession>, IdentityError> {
        let url = format!("{}/v1/client", self.base_url);
        let response = with_credentials(self.http.get(&url))
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IdentityError::Status(response.status().as_u16()));
        }

        let envelope: ClientEnvelope = response
            .json()
            .await
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;
        Ok(envelope.response.and_then(|c| c.active_session()))
    }
}

#[async_trait(?Send)]
impl SessionBackend for FrontendApiSession {
    fn subscribe(&self) -> watch::Receiver<Identity> {
        self.state.subscribe()
    }

    async fn refresh(&self) {
        match self.load_client().await {
            Ok(session) => {
                tracing::debug!(
                    base_url = %self.base_url,
                    signed_in = session.is_some(),
                    "Session loaded"
                );
                self.publish(session);
            }
            Err(e) => {
                tracing::warn!(
                    base_url = %self.base_url,
                    error = %e,
                    "Failed to load session, treating user as signed out"
                );
                self.publish(None);
            }
        }
    }

    async fn fetch_token(&self) -> Result<String, IdentityError> {
        let session_id = self.session_id().ok_or(IdentityError::NoSession)?;
        let url = format!(
            "{}/v1/client/sessions/{}/tokens",
            self.base_url, session_id
        );

        let response = with_credentials(self.http.post(&url))
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IdentityError::Status(response.status().as_u16()));
        }

        let token: TokenResource = response
            .json()
            .await
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;
        Ok(token.jwt)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        let Some(session_id) = self.session_id() else {
            return Ok(());
        };
        let url = format!("{}/v1/client/sessions/{}/end", self.base_url, session_id);

        let result = with_credentials(self.http.post(&url))
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))
            .and_then(|r| {
                if r.status().is_success() {
                    Ok(())
                } else {
                    Err(IdentityError::Status(r.status().as_u16()))
                }
            });

        // The local session is gone either way.
        self.publish(None);
        result
    }

    fn page_url(&self, page: HostedPage) -> Option<String> {
        Some(format!("{}/{}", self.account_portal(), page.path()))
    }
}

#[cfg(target_arch = "wasm32")]
fn with_credentials(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    builder.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    builder
}
