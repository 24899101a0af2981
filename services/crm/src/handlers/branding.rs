use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use cierre_core::identity::IdentityHeaders;
use cierre_core::response::ApiResponse;

use crate::domain::types::Branding;
use crate::error::CrmServiceError;
use crate::state::AppState;
use crate::usecase::branding::{GetBrandingUseCase, UpdateBrandingInput, UpdateBrandingUseCase};

#[derive(Serialize)]
pub struct BrandingResponse {
    pub org_name: String,
    pub primary_color: String,
    pub accent_color: String,
    pub logo_url: Option<String>,
}

impl From<Branding> for BrandingResponse {
    fn from(branding: Branding) -> Self {
        Self {
            org_name: branding.org_name,
            primary_color: branding.primary_color,
            accent_color: branding.accent_color,
            logo_url: branding.logo_url,
        }
    }
}

// ── GET /branding ────────────────────────────────────────────────────────────

pub async fn get_branding(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BrandingResponse>>, CrmServiceError> {
    let usecase = GetBrandingUseCase {
        branding: state.branding_repo(),
    };
    let branding = usecase.execute().await?;
    Ok(Json(ApiResponse::ok(branding.into())))
}

// ── PUT /branding ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateBrandingRequest {
    pub org_name: String,
    pub primary_color: String,
    pub accent_color: String,
    pub logo_url: Option<String>,
}

pub async fn update_branding(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<UpdateBrandingRequest>,
) -> Result<Json<ApiResponse<BrandingResponse>>, CrmServiceError> {
    let usecase = UpdateBrandingUseCase {
        branding: state.branding_repo(),
        users: state.user_repo(),
    };
    let branding = usecase
        .execute(
            identity.user_id,
            UpdateBrandingInput {
                org_name: body.org_name,
                primary_color: body.primary_color,
                accent_color: body.accent_color,
                logo_url: body.logo_url,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(branding.into())))
}
