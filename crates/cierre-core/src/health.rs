use axum::http::StatusCode;

/// `GET /healthz` — the process is up.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz` — the service can take traffic. Services with external
/// dependencies wire their own variant; the default always succeeds.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
