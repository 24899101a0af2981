use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cierre_core::identity::IdentityHeaders;
use cierre_core::response::ApiResponse;

use crate::domain::types::ContactAccessRequest;
use crate::error::CrmServiceError;
use crate::state::AppState;
use crate::usecase::access_request::{
    CreateAccessRequestInput, CreateAccessRequestUseCase, ListAccessRequestsUseCase, ReviewAction,
    ReviewAccessRequestUseCase,
};

#[derive(Serialize)]
pub struct AccessRequestResponse {
    pub id: String,
    pub requester_id: String,
    pub contact_id: String,
    pub status: &'static str,
    pub reason: String,
    pub reviewed_by: Option<String>,
    #[serde(serialize_with = "cierre_core::serde::opt_to_rfc3339_ms")]
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "cierre_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ContactAccessRequest> for AccessRequestResponse {
    fn from(request: ContactAccessRequest) -> Self {
        Self {
            id: request.id.to_string(),
            requester_id: request.requester_id.to_string(),
            contact_id: request.contact_id.to_string(),
            status: request.status.as_str(),
            reason: request.reason,
            reviewed_by: request.reviewed_by.map(|id| id.to_string()),
            reviewed_at: request.reviewed_at,
            created_at: request.created_at,
        }
    }
}

// ── POST /access-requests ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateAccessRequestRequest {
    pub contact_id: Uuid,
    #[serde(default)]
    pub reason: String,
}

pub async fn create_access_request(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateAccessRequestRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccessRequestResponse>>), CrmServiceError> {
    let usecase = CreateAccessRequestUseCase {
        requests: state.access_request_repo(),
        contacts: state.contact_repo(),
        users: state.user_repo(),
    };
    let request = usecase
        .execute(
            identity.user_id,
            CreateAccessRequestInput {
                contact_id: body.contact_id,
                reason: body.reason,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request.into()))))
}

// ── GET /access-requests ─────────────────────────────────────────────────────

pub async fn get_access_requests(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AccessRequestResponse>>>, CrmServiceError> {
    let usecase = ListAccessRequestsUseCase {
        requests: state.access_request_repo(),
        users: state.user_repo(),
    };
    let requests = usecase.execute(identity.user_id).await?;
    Ok(Json(ApiResponse::ok(
        requests
            .into_iter()
            .map(AccessRequestResponse::from)
            .collect(),
    )))
}

// ── POST /access-requests/{id}/review ────────────────────────────────────────

#[derive(Deserialize)]
pub struct ReviewRequest {
    pub action: String,
}

pub async fn review_access_request(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(body): Json<ReviewRequest>,
) -> Result<Json<ApiResponse<AccessRequestResponse>>, CrmServiceError> {
    let action = ReviewAction::parse(&body.action).ok_or(CrmServiceError::InvalidAction)?;
    let usecase = ReviewAccessRequestUseCase {
        requests: state.access_request_repo(),
        users: state.user_repo(),
    };
    let request = usecase
        .execute(identity.user_id, request_id, action)
        .await?;
    Ok(Json(ApiResponse::ok(request.into())))
}
