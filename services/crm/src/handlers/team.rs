use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cierre_core::identity::IdentityHeaders;
use cierre_core::response::ApiResponse;

use crate::domain::types::Team;
use crate::error::CrmServiceError;
use crate::state::AppState;
use crate::usecase::team::{
    CreateTeamInput, CreateTeamUseCase, ListTeamsUseCase, UpdateTeamInput, UpdateTeamUseCase,
};

#[derive(Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub leader_id: Option<String>,
    #[serde(serialize_with = "cierre_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "cierre_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id.to_string(),
            name: team.name,
            description: team.description,
            leader_id: team.leader_id.map(|id| id.to_string()),
            created_at: team.created_at,
            updated_at: team.updated_at,
        }
    }
}

// ── GET /teams ───────────────────────────────────────────────────────────────

pub async fn get_teams(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TeamResponse>>>, CrmServiceError> {
    let usecase = ListTeamsUseCase {
        teams: state.team_repo(),
        users: state.user_repo(),
    };
    let teams = usecase.execute(identity.user_id).await?;
    Ok(Json(ApiResponse::ok(
        teams.into_iter().map(TeamResponse::from).collect(),
    )))
}

// ── POST /teams ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub leader_id: Option<Uuid>,
}

pub async fn create_team(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TeamResponse>>), CrmServiceError> {
    let usecase = CreateTeamUseCase {
        teams: state.team_repo(),
        users: state.user_repo(),
    };
    let team = usecase
        .execute(
            identity.user_id,
            CreateTeamInput {
                name: body.name,
                description: body.description,
                leader_id: body.leader_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(team.into()))))
}

// ── PATCH /teams/{id} ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "cierre_core::serde::double_option")]
    pub leader_id: Option<Option<Uuid>>,
}

pub async fn update_team(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Json(body): Json<UpdateTeamRequest>,
) -> Result<Json<ApiResponse<TeamResponse>>, CrmServiceError> {
    let usecase = UpdateTeamUseCase {
        teams: state.team_repo(),
        users: state.user_repo(),
    };
    let team = usecase
        .execute(
            identity.user_id,
            team_id,
            UpdateTeamInput {
                name: body.name,
                description: body.description,
                leader_id: body.leader_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(team.into())))
}
