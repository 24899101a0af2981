use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use cierre_core::identity::IdentityHeaders;
use cierre_core::response::ApiResponse;

use crate::domain::types::DealStage;
use crate::error::CrmServiceError;
use crate::state::AppState;
use crate::usecase::stage::{CreateStageInput, CreateStageUseCase, ListStagesUseCase};

#[derive(Serialize)]
pub struct StageResponse {
    pub id: String,
    pub name: String,
    pub order: i32,
    pub color: String,
    pub is_default: bool,
    pub is_active: bool,
    #[serde(serialize_with = "cierre_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<DealStage> for StageResponse {
    fn from(stage: DealStage) -> Self {
        Self {
            id: stage.id.to_string(),
            name: stage.name,
            order: stage.order_index,
            color: stage.color,
            is_default: stage.is_default,
            is_active: stage.is_active,
            created_at: stage.created_at,
        }
    }
}

// ── GET /stages ──────────────────────────────────────────────────────────────

pub async fn get_stages(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StageResponse>>>, CrmServiceError> {
    let usecase = ListStagesUseCase {
        stages: state.stage_repo(),
    };
    let stages = usecase.execute().await?;
    Ok(Json(ApiResponse::ok(
        stages.into_iter().map(StageResponse::from).collect(),
    )))
}

// ── POST /stages ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateStageRequest {
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub is_default: bool,
}

fn default_color() -> String {
    "#6b7280".to_owned()
}

pub async fn create_stage(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateStageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StageResponse>>), CrmServiceError> {
    let usecase = CreateStageUseCase {
        stages: state.stage_repo(),
        users: state.user_repo(),
    };
    let stage = usecase
        .execute(
            identity.user_id,
            CreateStageInput {
                name: body.name,
                color: body.color,
                is_default: body.is_default,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(stage.into()))))
}
