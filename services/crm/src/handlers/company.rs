use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cierre_core::identity::IdentityHeaders;
use cierre_core::response::ApiResponse;

use crate::domain::types::Company;
use crate::error::CrmServiceError;
use crate::state::AppState;
use crate::usecase::company::{
    CreateCompanyInput, CreateCompanyUseCase, ListCompaniesUseCase, UpdateCompanyInput,
    UpdateCompanyUseCase,
};

#[derive(Serialize)]
pub struct CompanyResponse {
    pub id: String,
    pub name: String,
    pub assigned_team_id: Option<String>,
    pub is_global: bool,
    #[serde(serialize_with = "cierre_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "cierre_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id.to_string(),
            name: company.name,
            assigned_team_id: company.assigned_team_id.map(|id| id.to_string()),
            is_global: company.is_global,
            created_at: company.created_at,
            updated_at: company.updated_at,
        }
    }
}

// ── GET /companies ───────────────────────────────────────────────────────────

pub async fn get_companies(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CompanyResponse>>>, CrmServiceError> {
    let usecase = ListCompaniesUseCase {
        companies: state.company_repo(),
        users: state.user_repo(),
    };
    let companies = usecase.execute(identity.user_id).await?;
    Ok(Json(ApiResponse::ok(
        companies.into_iter().map(CompanyResponse::from).collect(),
    )))
}

// ── POST /companies ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub assigned_team_id: Option<Uuid>,
    #[serde(default)]
    pub is_global: bool,
}

pub async fn create_company(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CompanyResponse>>), CrmServiceError> {
    let usecase = CreateCompanyUseCase {
        companies: state.company_repo(),
        teams: state.team_repo(),
        users: state.user_repo(),
    };
    let company = usecase
        .execute(
            identity.user_id,
            CreateCompanyInput {
                name: body.name,
                assigned_team_id: body.assigned_team_id,
                is_global: body.is_global,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(company.into()))))
}

// ── PATCH /companies/{id} ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "cierre_core::serde::double_option")]
    pub assigned_team_id: Option<Option<Uuid>>,
    pub is_global: Option<bool>,
}

pub async fn update_company(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(body): Json<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<CompanyResponse>>, CrmServiceError> {
    let usecase = UpdateCompanyUseCase {
        companies: state.company_repo(),
        teams: state.team_repo(),
        users: state.user_repo(),
    };
    let company = usecase
        .execute(
            identity.user_id,
            company_id,
            UpdateCompanyInput {
                name: body.name,
                assigned_team_id: body.assigned_team_id,
                is_global: body.is_global,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(company.into())))
}
