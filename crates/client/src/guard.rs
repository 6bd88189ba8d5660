use shared_types::{AuthKind, Identity};

/// Where unauthenticated users are sent.
pub const SIGN_IN_PATH: &str = "/sign-in";

/// Outcome of checking the current identity against a protected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// The identity service has not reported yet; show a placeholder.
    Loading,
    Redirect(&'static str),
}

/// Decide whether a protected route may render for `identity`.
pub fn evaluate(kind: AuthKind, identity: &Identity) -> GuardDecision {
    match kind {
        AuthKind::Disabled => GuardDecision::Render,
        AuthKind::Enabled if identity.is_loading => GuardDecision::Loading,
        AuthKind::Enabled if !identity.is_authenticated => GuardDecision::Redirect(SIGN_IN_PATH),
        AuthKind::Enabled => GuardDecision::Render,
    }
}

/// Whether protected data may be requested for `identity`. False while the
/// guard would redirect or is still waiting on the identity service.
pub fn may_load_data(kind: AuthKind, identity: &Identity) -> bool {
    evaluate(kind, identity) == GuardDecision::Render
}
