//! Gateway-injected identity extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;
use uuid::Uuid;

use crate::error::AppError;

/// Caller identity injected by the gateway via the `x-cierre-user-id` header.
///
/// Rejects with 401 when the header is absent or not a UUID. Only the user id
/// is trusted from the edge: level, team, and manager links are re-read from
/// the store on every request, so a stale or tampered level claim can never
/// widen visibility.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = AppError;

    // axum-core 0.5 wants `fn -> impl Future + Send`, not `async fn`: with
    // Rust 1.82+ precise capturing an `async fn` here trips E0195. Read the
    // header synchronously and return a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get("x-cierre-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        async move {
            let user_id = user_id.ok_or(AppError::Unauthorized)?;
            Ok(Self { user_id })
        }
    }
}
