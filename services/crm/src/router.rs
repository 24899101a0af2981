use axum::{
    Router,
    routing::{get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use cierre_core::health::{healthz, readyz};
use cierre_core::middleware::request_id_layer;

use crate::handlers::{
    access_request::{create_access_request, get_access_requests, review_access_request},
    branding::{get_branding, update_branding},
    company::{create_company, get_companies, update_company},
    contact::{create_contact, get_contact, get_contacts},
    deal::{create_deal, get_deals, get_pipeline_report},
    exchange_rate::{get_latest_rate, record_rate},
    stage::{create_stage, get_stages},
    team::{create_team, get_teams, update_team},
    user::{create_user, get_me, get_users, update_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", get(get_users))
        .route("/users", post(create_user))
        .route("/users/@me", get(get_me))
        .route("/users/{id}", patch(update_user))
        // Teams
        .route("/teams", get(get_teams))
        .route("/teams", post(create_team))
        .route("/teams/{id}", patch(update_team))
        // Companies
        .route("/companies", get(get_companies))
        .route("/companies", post(create_company))
        .route("/companies/{id}", patch(update_company))
        // Contacts
        .route("/contacts", get(get_contacts))
        .route("/contacts", post(create_contact))
        .route("/contacts/{id}", get(get_contact))
        // Access requests
        .route("/access-requests", get(get_access_requests))
        .route("/access-requests", post(create_access_request))
        .route("/access-requests/{id}/review", post(review_access_request))
        // Deals
        .route("/deals", get(get_deals))
        .route("/deals", post(create_deal))
        .route("/deals/pipeline", get(get_pipeline_report))
        // Stages
        .route("/stages", get(get_stages))
        .route("/stages", post(create_stage))
        // Exchange rates
        .route("/exchange-rates/latest", get(get_latest_rate))
        .route("/exchange-rates", post(record_rate))
        // Branding
        .route("/branding", get(get_branding))
        .route("/branding", put(update_branding))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
