use sea_orm_migration::prelude::*;

mod m20260815_000001_create_teams;
mod m20260815_000002_create_users;
mod m20260815_000003_create_companies;
mod m20260815_000004_create_contacts;
mod m20260815_000005_create_deal_stages;
mod m20260815_000006_create_deals;
mod m20260815_000007_create_contact_access_requests;
mod m20260815_000008_create_exchange_rates;
mod m20260815_000009_create_branding_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_create_teams::Migration),
            Box::new(m20260815_000002_create_users::Migration),
            Box::new(m20260815_000003_create_companies::Migration),
            Box::new(m20260815_000004_create_contacts::Migration),
            Box::new(m20260815_000005_create_deal_stages::Migration),
            Box::new(m20260815_000006_create_deals::Migration),
            Box::new(m20260815_000007_create_contact_access_requests::Migration),
            Box::new(m20260815_000008_create_exchange_rates::Migration),
            Box::new(m20260815_000009_create_branding_settings::Migration),
        ]
    }
}
