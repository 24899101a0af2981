use chrono::{FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::repository::{ExchangeRateRepository, UserRepository};
use crate::domain::types::ExchangeRate;
use crate::error::CrmServiceError;

/// Reference timezone for the one-rate-per-day rule (UTC-3, Buenos Aires).
/// Date-only equality; two writes in the same calendar day hit the same row
/// no matter the server's clock zone.
fn today_reference() -> NaiveDate {
    match FixedOffset::west_opt(3 * 3600) {
        Some(offset) => Utc::now().with_timezone(&offset).date_naive(),
        None => Utc::now().date_naive(),
    }
}

// ── LatestRate ───────────────────────────────────────────────────────────────

pub struct LatestRateUseCase<X: ExchangeRateRepository> {
    pub rates: X,
}

impl<X: ExchangeRateRepository> LatestRateUseCase<X> {
    pub async fn execute(&self) -> Result<ExchangeRate, CrmServiceError> {
        self.rates
            .latest()
            .await?
            .ok_or(CrmServiceError::RateUnavailable)
    }
}

// ── RecordRate ───────────────────────────────────────────────────────────────

pub struct RecordRateInput {
    pub usd_to_ars: Decimal,
    pub source: String,
}

pub struct RecordRateUseCase<X: ExchangeRateRepository, U: UserRepository> {
    pub rates: X,
    pub users: U,
}

impl<X: ExchangeRateRepository, U: UserRepository> RecordRateUseCase<X, U> {
    /// Upsert-on-today: a second write on the same reference-timezone day
    /// overwrites today's row instead of inserting a duplicate.
    pub async fn execute(
        &self,
        actor_id: Uuid,
        input: RecordRateInput,
    ) -> Result<ExchangeRate, CrmServiceError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        if !actor.level.is_admin() {
            return Err(CrmServiceError::Forbidden);
        }
        if input.usd_to_ars <= Decimal::ZERO {
            return Err(CrmServiceError::Validation("rate must be positive".to_owned()));
        }
        let today = today_reference();
        if let Some(existing) = self.rates.find_by_date(today).await? {
            let updated = ExchangeRate {
                usd_to_ars: input.usd_to_ars,
                source: input.source,
                ..existing
            };
            self.rates.update(&updated).await?;
            return Ok(updated);
        }
        let rate = ExchangeRate {
            id: Uuid::now_v7(),
            date: today,
            usd_to_ars: input.usd_to_ars,
            source: input.source,
            created_at: Utc::now(),
        };
        self.rates.create(&rate).await?;
        Ok(rate)
    }
}
