use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(cierre_crm_migration::Migrator).await;
}
