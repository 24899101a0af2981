use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use cierre_domain::currency::{Currency, convert};

use crate::domain::repository::{
    CompanyRepository, ContactRepository, DealRepository, ExchangeRateRepository, StageRepository,
    UserRepository,
};
use crate::domain::types::{Deal, DealStage};
use crate::error::CrmServiceError;
use crate::usecase::visibility::visible_users;

/// Per-stage pipeline rollup, all amounts normalized into one currency.
/// Stage maps are sparse: stages with no deals do not appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub currency: Currency,
    pub total_value: Decimal,
    pub closed_value: Decimal,
    pub counts_by_stage: HashMap<Uuid, u64>,
    pub value_by_stage: HashMap<Uuid, Decimal>,
}

/// Single pass over the visible deal set. `usd_to_ars` is only consulted for
/// deals whose entry currency differs from `target`; callers must have
/// resolved a real rate before calling when any such deal exists.
pub fn aggregate(
    deals: &[Deal],
    target: Currency,
    usd_to_ars: Decimal,
    closed_won_stage: Option<Uuid>,
) -> PipelineReport {
    let mut report = PipelineReport {
        currency: target,
        total_value: Decimal::ZERO,
        closed_value: Decimal::ZERO,
        counts_by_stage: HashMap::new(),
        value_by_stage: HashMap::new(),
    };
    for deal in deals {
        let value = convert(deal.native_amount(), deal.currency, target, usd_to_ars);
        report.total_value += value;
        *report.counts_by_stage.entry(deal.stage_id).or_insert(0) += 1;
        *report
            .value_by_stage
            .entry(deal.stage_id)
            .or_insert(Decimal::ZERO) += value;
        if closed_won_stage == Some(deal.stage_id) {
            report.closed_value += value;
        }
    }
    report
}

/// The terminal won stage, identified by name among active stages.
pub fn closed_won_stage_id(stages: &[DealStage]) -> Option<Uuid> {
    stages
        .iter()
        .find(|s| {
            let normalized: String = s
                .name
                .to_lowercase()
                .chars()
                .map(|c| if c == '-' || c == '_' { ' ' } else { c })
                .collect();
            normalized.trim() == "closed won"
        })
        .map(|s| s.id)
}

// ── ListDeals ────────────────────────────────────────────────────────────────

pub struct ListDealsUseCase<D: DealRepository, U: UserRepository> {
    pub deals: D,
    pub users: U,
}

impl<D: DealRepository, U: UserRepository> ListDealsUseCase<D, U> {
    /// Deals owned by any user the actor may see.
    pub async fn execute(&self, actor_id: Uuid) -> Result<Vec<Deal>, CrmServiceError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        let all = self.users.find_all().await?;
        let owner_ids: Vec<Uuid> = visible_users(&actor, &all).iter().map(|u| u.id).collect();
        self.deals.find_by_owners(&owner_ids).await
    }
}

// ── CreateDeal ───────────────────────────────────────────────────────────────

pub struct CreateDealInput {
    pub title: String,
    pub company_id: Uuid,
    pub contact_id: Option<Uuid>,
    pub stage_id: Uuid,
    pub currency: Currency,
    pub amount: Decimal,
    pub probability: i16,
    pub expected_close_date: Option<chrono::NaiveDate>,
}

pub struct CreateDealUseCase<
    D: DealRepository,
    S: StageRepository,
    C: CompanyRepository,
    K: ContactRepository,
    X: ExchangeRateRepository,
    U: UserRepository,
> {
    pub deals: D,
    pub stages: S,
    pub companies: C,
    pub contacts: K,
    pub rates: X,
    pub users: U,
}

impl<D, S, C, K, X, U> CreateDealUseCase<D, S, C, K, X, U>
where
    D: DealRepository,
    S: StageRepository,
    C: CompanyRepository,
    K: ContactRepository,
    X: ExchangeRateRepository,
    U: UserRepository,
{
    pub async fn execute(
        &self,
        actor_id: Uuid,
        input: CreateDealInput,
    ) -> Result<Deal, CrmServiceError> {
        if self.users.find_by_id(actor_id).await?.is_none() {
            return Err(CrmServiceError::UserNotFound);
        }
        if input.title.trim().is_empty() {
            return Err(CrmServiceError::Validation("title must not be empty".to_owned()));
        }
        if input.amount < Decimal::ZERO {
            return Err(CrmServiceError::Validation("amount must be non-negative".to_owned()));
        }
        if !(0..=100).contains(&input.probability) {
            return Err(CrmServiceError::Validation("probability must be 0-100".to_owned()));
        }
        let stage = self
            .stages
            .find_by_id(input.stage_id)
            .await?
            .ok_or(CrmServiceError::StageNotFound)?;
        if !stage.is_active {
            return Err(CrmServiceError::Validation(
                "stage is not active".to_owned(),
            ));
        }
        if self.companies.find_by_id(input.company_id).await?.is_none() {
            return Err(CrmServiceError::CompanyNotFound);
        }
        if let Some(contact_id) = input.contact_id {
            if self.contacts.find_by_id(contact_id).await?.is_none() {
                return Err(CrmServiceError::ContactNotFound);
            }
        }
        // Both currency columns are filled at write time so reporting never
        // re-converts historical rows at a later rate.
        let rate = self
            .rates
            .latest()
            .await?
            .ok_or(CrmServiceError::RateUnavailable)?;
        let (amount_usd, amount_ars) = match input.currency {
            Currency::Usd => (
                input.amount,
                convert(input.amount, Currency::Usd, Currency::Ars, rate.usd_to_ars),
            ),
            Currency::Ars => (
                convert(input.amount, Currency::Ars, Currency::Usd, rate.usd_to_ars),
                input.amount,
            ),
        };
        let now = Utc::now();
        let deal = Deal {
            id: Uuid::now_v7(),
            user_id: actor_id,
            company_id: input.company_id,
            contact_id: input.contact_id,
            stage_id: input.stage_id,
            title: input.title,
            currency: input.currency,
            amount_usd,
            amount_ars,
            probability: input.probability,
            expected_close_date: input.expected_close_date,
            closed_at: None,
            created_at: now,
            updated_at: now,
        };
        self.deals.create(&deal).await?;
        Ok(deal)
    }
}

// ── PipelineReport ───────────────────────────────────────────────────────────

pub struct PipelineReportUseCase<
    D: DealRepository,
    S: StageRepository,
    X: ExchangeRateRepository,
    U: UserRepository,
> {
    pub deals: D,
    pub stages: S,
    pub rates: X,
    pub users: U,
}

impl<D, S, X, U> PipelineReportUseCase<D, S, X, U>
where
    D: DealRepository,
    S: StageRepository,
    X: ExchangeRateRepository,
    U: UserRepository,
{
    pub async fn execute(
        &self,
        actor_id: Uuid,
        target: Currency,
    ) -> Result<PipelineReport, CrmServiceError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        let all = self.users.find_all().await?;
        let owner_ids: Vec<Uuid> = visible_users(&actor, &all).iter().map(|u| u.id).collect();
        let deals = self.deals.find_by_owners(&owner_ids).await?;
        let stages = self.stages.find_active().await?;
        // A persisted rate is only required when some deal actually needs
        // converting; an all-identity report must not fail on an empty
        // exchange_rates table.
        let needs_rate = deals.iter().any(|d| d.currency != target);
        let usd_to_ars = if needs_rate {
            self.rates
                .latest()
                .await?
                .ok_or(CrmServiceError::RateUnavailable)?
                .usd_to_ars
        } else {
            Decimal::ONE
        };
        Ok(aggregate(
            &deals,
            target,
            usd_to_ars,
            closed_won_stage_id(&stages),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn deal(stage_id: Uuid, currency: Currency, amount: Decimal) -> Deal {
        let now = Utc::now();
        let (amount_usd, amount_ars) = match currency {
            Currency::Usd => (amount, Decimal::ZERO),
            Currency::Ars => (Decimal::ZERO, amount),
        };
        Deal {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            company_id: Uuid::now_v7(),
            contact_id: None,
            stage_id,
            title: "d".into(),
            currency,
            amount_usd,
            amount_ars,
            probability: 50,
            expected_close_date: None,
            closed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn stage(name: &str) -> DealStage {
        DealStage {
            id: Uuid::now_v7(),
            name: name.into(),
            order_index: 0,
            color: "#888888".into(),
            is_default: false,
            is_active: true,
            company_owner_id: None,
            created_at: Utc::now(),
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn empty_deal_set_aggregates_to_zero() {
        let report = aggregate(&[], Currency::Usd, Decimal::ONE, None);
        assert_eq!(report.total_value, Decimal::ZERO);
        assert_eq!(report.closed_value, Decimal::ZERO);
        assert!(report.counts_by_stage.is_empty());
        assert!(report.value_by_stage.is_empty());
    }

    #[test]
    fn aggregates_totals_and_closed_value_per_stage() {
        let prospecting = Uuid::now_v7();
        let closed_won = Uuid::now_v7();
        let deals = vec![
            deal(prospecting, Currency::Usd, dec("100")),
            deal(closed_won, Currency::Usd, dec("200")),
        ];
        let report = aggregate(&deals, Currency::Usd, Decimal::ONE, Some(closed_won));
        assert_eq!(report.total_value, dec("300"));
        assert_eq!(report.closed_value, dec("200"));
        assert_eq!(report.counts_by_stage[&prospecting], 1);
        assert_eq!(report.counts_by_stage[&closed_won], 1);
        assert_eq!(report.value_by_stage[&prospecting], dec("100"));
        assert_eq!(report.value_by_stage[&closed_won], dec("200"));
    }

    #[test]
    fn stage_maps_stay_sparse() {
        let occupied = Uuid::now_v7();
        let deals = vec![deal(occupied, Currency::Usd, dec("10"))];
        let report = aggregate(&deals, Currency::Usd, Decimal::ONE, None);
        assert_eq!(report.counts_by_stage.len(), 1);
        assert_eq!(report.value_by_stage.len(), 1);
    }

    #[test]
    fn converts_mixed_currencies_into_target() {
        let stage_id = Uuid::now_v7();
        let deals = vec![
            deal(stage_id, Currency::Usd, dec("100")),
            deal(stage_id, Currency::Ars, dec("50000")),
        ];
        // 50000 ARS / 1000 = 50 USD
        let report = aggregate(&deals, Currency::Usd, dec("1000"), None);
        assert_eq!(report.total_value, dec("150.00"));
        assert_eq!(report.counts_by_stage[&stage_id], 2);
    }

    #[test]
    fn aggregate_is_order_independent() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let deals = vec![
            deal(a, Currency::Usd, dec("1.11")),
            deal(b, Currency::Ars, dec("999.99")),
            deal(a, Currency::Usd, dec("7")),
        ];
        let mut reversed = deals.clone();
        reversed.reverse();
        let forward = aggregate(&deals, Currency::Ars, dec("1234.5678"), Some(a));
        let backward = aggregate(&reversed, Currency::Ars, dec("1234.5678"), Some(a));
        assert_eq!(forward, backward);
    }

    #[test]
    fn finds_closed_won_stage_by_name_variants() {
        for name in ["Closed Won", "closed-won", "CLOSED_WON", "closed won"] {
            let s = stage(name);
            assert_eq!(closed_won_stage_id(&[stage("Prospecting"), s.clone()]), Some(s.id));
        }
        assert_eq!(closed_won_stage_id(&[stage("Closed Lost")]), None);
    }
}
