use serde::Deserialize;

use cierre_core::config::Config;

/// CRM service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct CrmConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3310). Env var: `CRM_PORT`.
    #[serde(default = "default_crm_port")]
    pub crm_port: u16,
}

fn default_crm_port() -> u16 {
    3310
}

impl Config for CrmConfig {}
