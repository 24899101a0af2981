use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cierre_core::identity::IdentityHeaders;
use cierre_core::response::ApiResponse;
use cierre_domain::currency::Currency;

use crate::domain::types::Deal;
use crate::error::CrmServiceError;
use crate::state::AppState;
use crate::usecase::deal::{
    CreateDealInput, CreateDealUseCase, ListDealsUseCase, PipelineReport, PipelineReportUseCase,
};

#[derive(Serialize)]
pub struct DealResponse {
    pub id: String,
    pub user_id: String,
    pub company_id: String,
    pub contact_id: Option<String>,
    pub stage_id: String,
    pub title: String,
    pub currency: Currency,
    pub amount_usd: Decimal,
    pub amount_ars: Decimal,
    pub probability: i16,
    pub expected_close_date: Option<chrono::NaiveDate>,
    #[serde(serialize_with = "cierre_core::serde::opt_to_rfc3339_ms")]
    pub closed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "cierre_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "cierre_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Deal> for DealResponse {
    fn from(deal: Deal) -> Self {
        Self {
            id: deal.id.to_string(),
            user_id: deal.user_id.to_string(),
            company_id: deal.company_id.to_string(),
            contact_id: deal.contact_id.map(|id| id.to_string()),
            stage_id: deal.stage_id.to_string(),
            title: deal.title,
            currency: deal.currency,
            amount_usd: deal.amount_usd,
            amount_ars: deal.amount_ars,
            probability: deal.probability,
            expected_close_date: deal.expected_close_date,
            closed_at: deal.closed_at,
            created_at: deal.created_at,
            updated_at: deal.updated_at,
        }
    }
}

// ── GET /deals ───────────────────────────────────────────────────────────────

pub async fn get_deals(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DealResponse>>>, CrmServiceError> {
    let usecase = ListDealsUseCase {
        deals: state.deal_repo(),
        users: state.user_repo(),
    };
    let deals = usecase.execute(identity.user_id).await?;
    Ok(Json(ApiResponse::ok(
        deals.into_iter().map(DealResponse::from).collect(),
    )))
}

// ── POST /deals ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateDealRequest {
    pub title: String,
    pub company_id: Uuid,
    pub contact_id: Option<Uuid>,
    pub stage_id: Uuid,
    pub currency: Currency,
    pub amount: Decimal,
    #[serde(default = "default_probability")]
    pub probability: i16,
    pub expected_close_date: Option<chrono::NaiveDate>,
}

fn default_probability() -> i16 {
    50
}

pub async fn create_deal(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateDealRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DealResponse>>), CrmServiceError> {
    let usecase = CreateDealUseCase {
        deals: state.deal_repo(),
        stages: state.stage_repo(),
        companies: state.company_repo(),
        contacts: state.contact_repo(),
        rates: state.exchange_rate_repo(),
        users: state.user_repo(),
    };
    let deal = usecase
        .execute(
            identity.user_id,
            CreateDealInput {
                title: body.title,
                company_id: body.company_id,
                contact_id: body.contact_id,
                stage_id: body.stage_id,
                currency: body.currency,
                amount: body.amount,
                probability: body.probability,
                expected_close_date: body.expected_close_date,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(deal.into()))))
}

// ── GET /deals/pipeline ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PipelineQuery {
    #[serde(default = "default_currency")]
    pub currency: Currency,
}

fn default_currency() -> Currency {
    Currency::Usd
}

#[derive(Serialize)]
pub struct PipelineReportResponse {
    pub currency: Currency,
    pub total_value: Decimal,
    pub closed_value: Decimal,
    pub counts_by_stage: HashMap<String, u64>,
    pub value_by_stage: HashMap<String, Decimal>,
}

impl From<PipelineReport> for PipelineReportResponse {
    fn from(report: PipelineReport) -> Self {
        Self {
            currency: report.currency,
            total_value: report.total_value,
            closed_value: report.closed_value,
            counts_by_stage: report
                .counts_by_stage
                .into_iter()
                .map(|(id, count)| (id.to_string(), count))
                .collect(),
            value_by_stage: report
                .value_by_stage
                .into_iter()
                .map(|(id, value)| (id.to_string(), value))
                .collect(),
        }
    }
}

pub async fn get_pipeline_report(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<PipelineQuery>,
) -> Result<Json<ApiResponse<PipelineReportResponse>>, CrmServiceError> {
    let usecase = PipelineReportUseCase {
        deals: state.deal_repo(),
        stages: state.stage_repo(),
        rates: state.exchange_rate_repo(),
        users: state.user_repo(),
    };
    let report = usecase.execute(identity.user_id, query.currency).await?;
    Ok(Json(ApiResponse::ok(report.into())))
}
