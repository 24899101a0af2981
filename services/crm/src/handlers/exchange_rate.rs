use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cierre_core::identity::IdentityHeaders;
use cierre_core::response::ApiResponse;

use crate::domain::types::ExchangeRate;
use crate::error::CrmServiceError;
use crate::state::AppState;
use crate::usecase::exchange_rate::{LatestRateUseCase, RecordRateInput, RecordRateUseCase};

#[derive(Serialize)]
pub struct ExchangeRateResponse {
    pub id: String,
    pub date: chrono::NaiveDate,
    pub usd_to_ars: Decimal,
    pub source: String,
    #[serde(serialize_with = "cierre_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ExchangeRate> for ExchangeRateResponse {
    fn from(rate: ExchangeRate) -> Self {
        Self {
            id: rate.id.to_string(),
            date: rate.date,
            usd_to_ars: rate.usd_to_ars,
            source: rate.source,
            created_at: rate.created_at,
        }
    }
}

// ── GET /exchange-rates/latest ───────────────────────────────────────────────

pub async fn get_latest_rate(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ExchangeRateResponse>>, CrmServiceError> {
    let usecase = LatestRateUseCase {
        rates: state.exchange_rate_repo(),
    };
    let rate = usecase.execute().await?;
    Ok(Json(ApiResponse::ok(rate.into())))
}

// ── POST /exchange-rates ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RecordRateRequest {
    pub usd_to_ars: Decimal,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "manual".to_owned()
}

pub async fn record_rate(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<RecordRateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ExchangeRateResponse>>), CrmServiceError> {
    let usecase = RecordRateUseCase {
        rates: state.exchange_rate_repo(),
        users: state.user_repo(),
    };
    let rate = usecase
        .execute(
            identity.user_id,
            RecordRateInput {
                usd_to_ars: body.usd_to_ars,
                source: body.source,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(rate.into()))))
}
