//! sea-orm entities for the CRM service, one module per table.

pub mod branding_settings;
pub mod companies;
pub mod contact_access_requests;
pub mod contacts;
pub mod deal_stages;
pub mod deals;
pub mod exchange_rates;
pub mod teams;
pub mod users;
