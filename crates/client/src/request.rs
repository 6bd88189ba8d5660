use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use shared_types::AuthKind;

use crate::auth::IdentityContext;

/// Identity header sent when authentication is disabled.
pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// Shape of the request body, which decides the content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// JSON or no body: `Content-Type: application/json`.
    Json,
    /// Multipart form: no content type here, the transport sets it along
    /// with the boundary.
    Multipart,
}

/// Compute the headers for one outgoing request.
///
/// Recomputed on every call since tokens rotate. Carries at most one
/// identity header:
/// - enabled with a token: `Authorization: Bearer <token>`
/// - enabled without a token: nothing, the request goes out anonymous
/// - disabled with a user id: `X-User-Id: <user id>`
pub async fn identity_headers(identity: &IdentityContext, body: BodyKind) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if body == BodyKind::Json {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    match identity.kind() {
        AuthKind::Enabled => match identity.get_token().await {
            Some(token) => match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!("Token is not a valid header value, omitting it"),
            },
            None => tracing::debug!("No token available, sending request without identity"),
        },
        AuthKind::Disabled => {
            if let Some(user_id) = identity.identity().user_id {
                match HeaderValue::from_str(&user_id) {
                    Ok(value) => {
                        headers.insert(USER_ID_HEADER, value);
                    }
                    Err(_) => tracing::warn!(
                        user_id = %user_id,
                        "Guest id is not a valid header value, omitting it"
                    ),
                }
            }
        }
    }

    headers
}
