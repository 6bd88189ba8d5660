use serde::{Deserialize, Serialize};

/// Snapshot of who the current user is.
///
/// In hosted mode `user_id` and `is_authenticated` are meaningless while
/// `is_loading` is true; readers must wait for loading to finish before
/// treating the user as signed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl Identity {
    /// Fixed identity used when authentication is disabled.
    pub fn guest(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            is_authenticated: true,
            is_loading: false,
        }
    }

    /// Hosted session that has not reported readiness yet.
    pub fn loading() -> Self {
        Self {
            user_id: None,
            is_authenticated: false,
            is_loading: true,
        }
    }

    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            is_authenticated: true,
            is_loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user_id: None,
            is_authenticated: false,
            is_loading: false,
        }
    }

    /// Identity of a loaded hosted session.
    pub fn from_session(user_id: Option<String>) -> Self {
        match user_id {
            Some(id) => Self::signed_in(id),
            None => Self::signed_out(),
        }
    }
}
