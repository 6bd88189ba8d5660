use shared_types::{parse_enabled_flag, AppConfig};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
const CONFIG_PATH: &str = "config.toml";

/// Load configuration once: `config.toml` (if present) overlaid with
/// environment variables. Only the first call has effect; later calls
/// return the stored value so the auth mode can never change mid-session.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let base = read_config_file();
        let config = apply_env(base, env_lookup);
        tracing::info!(
            api_url = %config.api.base_url,
            auth_enabled = config.auth.enabled,
            "Configuration loaded"
        );
        config
    })
}

/// Parse `contents` as `config.toml`. Unparsable input yields defaults.
pub fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to parse {CONFIG_PATH}, using defaults");
        AppConfig::default()
    })
}

/// Overlay `API_URL`, `AUTH_ENABLED`, `AUTH_PUBLISHABLE_KEY` and
/// `RESERVED_USER_ID` from `lookup` on top of `config`.
pub fn apply_env<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("API_URL").filter(|v| !v.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }
    if let Some(flag) = lookup("AUTH_ENABLED") {
        config.auth.enabled = parse_enabled_flag(&flag);
    }
    if let Some(key) = lookup("AUTH_PUBLISHABLE_KEY") {
        config.auth.publishable_key = Some(key);
    }
    if let Some(id) = lookup("RESERVED_USER_ID").filter(|v| !v.trim().is_empty()) {
        config.auth.reserved_user_id = id;
    }
    config
}

#[cfg(not(target_arch = "wasm32"))]
fn read_config_file() -> AppConfig {
    let _ = dotenvy::dotenv();
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => parse_config(&contents),
        Err(e) => {
            tracing::debug!(error = %e, "{CONFIG_PATH} not found, using defaults");
            AppConfig::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

// Browser builds have no filesystem or process environment; values are
// baked in at compile time.
#[cfg(target_arch = "wasm32")]
fn read_config_file() -> AppConfig {
    AppConfig::default()
}

#[cfg(target_arch = "wasm32")]
fn env_lookup(name: &str) -> Option<String> {
    let value = match name {
        "API_URL" => option_env!("API_URL"),
        "AUTH_ENABLED" => option_env!("AUTH_ENABLED"),
        "AUTH_PUBLISHABLE_KEY" => option_env!("AUTH_PUBLISHABLE_KEY"),
        "RESERVED_USER_ID" => option_env!("RESERVED_USER_ID"),
        _ => None,
    };
    value.map(str::to_string)
}
