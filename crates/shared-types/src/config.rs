use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Guest id used when authentication is disabled and none is configured.
pub const DEFAULT_RESERVED_USER_ID: &str = "guest-user-000";

/// Backend used when no `API_URL` is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Location of the case-management backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
        }
    }
}

/// Authentication settings. Every field defaults so that a missing or
/// incomplete config leaves authentication disabled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub publishable_key: Option<String>,
    #[serde(default = "default_reserved_user_id")]
    pub reserved_user_id: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            publishable_key: None,
            reserved_user_id: default_reserved_user_id(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_reserved_user_id() -> String {
    DEFAULT_RESERVED_USER_ID.to_string()
}

/// Process-wide authentication mode, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Every request is attributed to a fixed guest id.
    Disabled { guest_user_id: String },
    /// A hosted identity service issues bearer tokens. `frontend_api` is
    /// the service's base URL, decoded from the publishable key.
    Enabled { frontend_api: String },
}

/// Discriminant of [`AuthMode`], cheap to copy into every consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    Disabled,
    Enabled,
}

impl AuthMode {
    pub fn kind(&self) -> AuthKind {
        match self {
            AuthMode::Disabled { .. } => AuthKind::Disabled,
            AuthMode::Enabled { .. } => AuthKind::Enabled,
        }
    }
}

/// Startup configuration that cannot be run in degraded form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Authentication is enabled but no publishable key is configured (AUTH_PUBLISHABLE_KEY)")]
    MissingPublishableKey,
    #[error("The configured publishable key is not valid: {0}")]
    InvalidPublishableKey(String),
}

impl AuthConfig {
    /// Resolve the authentication mode this process runs in.
    pub fn mode(&self) -> Result<AuthMode, ConfigError> {
        if !self.enabled {
            let guest_user_id = if self.reserved_user_id.trim().is_empty() {
                default_reserved_user_id()
            } else {
                self.reserved_user_id.clone()
            };
            return Ok(AuthMode::Disabled { guest_user_id });
        }

        let key = self
            .publishable_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingPublishableKey)?;

        let host = frontend_api_host(key)?;
        Ok(AuthMode::Enabled {
            frontend_api: format!("https://{host}"),
        })
    }
}

/// Decode the identity service host from a publishable key of the form
/// `pk_(test|live)_<base64("<host>$")>`.
pub fn frontend_api_host(publishable_key: &str) -> Result<String, ConfigError> {
    let encoded = publishable_key
        .strip_prefix("pk_test_")
        .or_else(|| publishable_key.strip_prefix("pk_live_"))
        .ok_or_else(|| ConfigError::InvalidPublishableKey("unknown key prefix".to_string()))?;

    let decoded = STANDARD
        .decode(encoded)
        .map_err(|e| ConfigError::InvalidPublishableKey(e.to_string()))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| ConfigError::InvalidPublishableKey("key is not UTF-8".to_string()))?;

    match decoded.strip_suffix('$') {
        Some(host) if !host.is_empty() => Ok(host.to_string()),
        _ => Err(ConfigError::InvalidPublishableKey(
            "missing host terminator".to_string(),
        )),
    }
}

/// Interpret an `AUTH_ENABLED` value. Only the literal `true` enables.
pub fn parse_enabled_flag(value: &str) -> bool {
    value.trim() == "true"
}
