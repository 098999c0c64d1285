use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, StatusCode, request::Parts};
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Caller identity carried in the `x-user-id` header. Not a session system:
/// the header is trusted as-is, as the frontend supplies it.
const USER_ID_HEADER: &str = "x-user-id";

fn header_identity(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Rejects with 401 when the identity header is absent.
#[derive(Debug, Clone)]
pub struct RequireUser(pub String);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match header_identity(&parts.headers) {
            Some(user_id) => Ok(Self(user_id)),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"code": "UNAUTHORIZED", "message": "missing x-user-id header"}})),
            )
                .into_response()),
        }
    }
}

/// Optional identity; endpoints that also serve unattended tooling fall back
/// to the `system` identity.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<String>);

impl MaybeUser {
    pub fn id(&self) -> &str {
        self.0.as_deref().unwrap_or("system")
    }
}

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(header_identity(&parts.headers)))
    }
}
