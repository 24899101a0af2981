use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use cierre_core::response::error_body;

/// CRM service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum CrmServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("team not found")]
    TeamNotFound,
    #[error("company not found")]
    CompanyNotFound,
    #[error("contact not found")]
    ContactNotFound,
    #[error("deal not found")]
    DealNotFound,
    #[error("stage not found")]
    StageNotFound,
    #[error("access request not found")]
    RequestNotFound,
    #[error("no exchange rate recorded")]
    RateUnavailable,
    #[error("forbidden")]
    Forbidden,
    #[error("validation error")]
    Validation(String),
    #[error("bad request")]
    BadRequest,
    #[error("invalid action")]
    InvalidAction,
    #[error("conflict")]
    Conflict,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CrmServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::TeamNotFound
            | Self::CompanyNotFound
            | Self::ContactNotFound
            | Self::DealNotFound
            | Self::StageNotFound
            | Self::RequestNotFound
            | Self::RateUnavailable => "NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidAction => "INVALID_ACTION",
            Self::Conflict => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for CrmServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::TeamNotFound
            | Self::CompanyNotFound
            | Self::ContactNotFound
            | Self::DealNotFound
            | Self::StageNotFound
            | Self::RequestNotFound
            | Self::RateUnavailable => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Validation(_) | Self::BadRequest | Self::InvalidAction => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests. 4xx are expected client errors; logging them here
        // would be noise. Internal errors need the anyhow chain logged so the
        // root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, code = "INTERNAL_ERROR", "internal error");
        }
        let details = match &self {
            Self::Validation(detail) => Some(serde_json::json!({ "detail": detail })),
            _ => None,
        };
        let body = error_body(self.code(), &self.to_string(), details);
        (status, axum::Json(body)).into_response()
    }
}
