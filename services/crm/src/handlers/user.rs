use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cierre_core::identity::IdentityHeaders;
use cierre_core::response::ApiResponse;
use cierre_domain::level::UserLevel;

use crate::domain::types::User;
use crate::error::CrmServiceError;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, GetMeUseCase, UpdateUserInput, UpdateUserUseCase,
};
use crate::usecase::visibility::ResolveVisibleUsersUseCase;

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub level: u8,
    pub manager_id: Option<String>,
    pub team_id: Option<String>,
    #[serde(serialize_with = "cierre_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "cierre_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            role: user.role,
            level: user.level.as_u8(),
            manager_id: user.manager_id.map(|id| id.to_string()),
            team_id: user.team_id.map(|id| id.to_string()),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn parse_level(level: u8) -> Result<UserLevel, CrmServiceError> {
    UserLevel::from_u8(level)
        .ok_or_else(|| CrmServiceError::Validation("level must be between 1 and 4".to_owned()))
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn get_users(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, CrmServiceError> {
    let usecase = ResolveVisibleUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute(identity.user_id).await?;
    Ok(Json(ApiResponse::ok(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserResponse>>, CrmServiceError> {
    let usecase = GetMeUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: String,
    pub level: u8,
    pub manager_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
}

pub async fn create_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), CrmServiceError> {
    let level = parse_level(body.level)?;
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            identity.user_id,
            CreateUserInput {
                name: body.name,
                email: body.email,
                role: body.role,
                level,
                manager_id: body.manager_id,
                team_id: body.team_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

// ── PATCH /users/{id} ────────────────────────────────────────────────────────

/// Double-`Option` fields distinguish "leave unchanged" (absent) from
/// "clear" (explicit null).
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub role: Option<String>,
    pub level: Option<u8>,
    #[serde(default, deserialize_with = "cierre_core::serde::double_option")]
    pub manager_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "cierre_core::serde::double_option")]
    pub team_id: Option<Option<Uuid>>,
}

pub async fn update_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, CrmServiceError> {
    let level = body.level.map(parse_level).transpose()?;
    let usecase = UpdateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            identity.user_id,
            user_id,
            UpdateUserInput {
                role: body.role,
                level,
                manager_id: body.manager_id,
                team_id: body.team_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
