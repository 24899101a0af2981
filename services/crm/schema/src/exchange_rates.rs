use sea_orm::entity::prelude::*;

/// Persisted USD→ARS rate. The newest row by `created_at` is the current
/// rate; at most one row is written per reference-timezone calendar day.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "exchange_rates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub date: chrono::NaiveDate,
    pub usd_to_ars: rust_decimal::Decimal,
    pub source: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
