use sea_orm::Database;
use tracing::info;

use cierre_core::config::Config;
use cierre_core::tracing::init_tracing;

use cierre_crm::config::CrmConfig;
use cierre_crm::router::build_router;
use cierre_crm::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = CrmConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.crm_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("crm service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
