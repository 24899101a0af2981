use rust_decimal::Decimal;

use cierre_domain::currency::Currency;
use cierre_crm::error::CrmServiceError;
use cierre_crm::usecase::deal::PipelineReportUseCase;
use cierre_testing::org::OrgFixture;

use crate::helpers::{
    MockDealRepo, MockRateRepo, MockStageRepo, MockUserRepo, org_users, test_deal, test_rate,
    test_stage,
};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[tokio::test]
async fn should_report_zero_totals_for_empty_pipeline() {
    let org = OrgFixture::new();
    let uc = PipelineReportUseCase {
        deals: MockDealRepo::new(vec![]),
        stages: MockStageRepo::new(vec![test_stage("Prospecting", 0)]),
        rates: MockRateRepo::empty(),
        users: MockUserRepo::new(org_users(&org)),
    };

    let report = uc.execute(org.admin_id, Currency::Usd).await.unwrap();

    assert_eq!(report.total_value, Decimal::ZERO);
    assert_eq!(report.closed_value, Decimal::ZERO);
    assert!(report.counts_by_stage.is_empty());
    assert!(report.value_by_stage.is_empty());
}

#[tokio::test]
async fn should_roll_up_totals_and_closed_value() {
    let org = OrgFixture::new();
    let prospecting = test_stage("Prospecting", 0);
    let closed_won = test_stage("Closed Won", 5);
    let deals = vec![
        test_deal(org.report_id, prospecting.id, Currency::Usd, dec("100")),
        test_deal(org.report_id, closed_won.id, Currency::Usd, dec("200")),
    ];

    let uc = PipelineReportUseCase {
        deals: MockDealRepo::new(deals),
        stages: MockStageRepo::new(vec![prospecting.clone(), closed_won.clone()]),
        rates: MockRateRepo::empty(),
        users: MockUserRepo::new(org_users(&org)),
    };

    let report = uc.execute(org.admin_id, Currency::Usd).await.unwrap();

    assert_eq!(report.total_value, dec("300"));
    assert_eq!(report.closed_value, dec("200"));
    assert_eq!(report.counts_by_stage[&prospecting.id], 1);
    assert_eq!(report.counts_by_stage[&closed_won.id], 1);
    assert_eq!(report.value_by_stage[&prospecting.id], dec("100"));
    assert_eq!(report.value_by_stage[&closed_won.id], dec("200"));
}

#[tokio::test]
async fn should_limit_report_to_visible_owners() {
    let org = OrgFixture::new();
    let stage = test_stage("Prospecting", 0);
    let deals = vec![
        test_deal(org.report_id, stage.id, Currency::Usd, dec("100")),
        test_deal(org.admin_id, stage.id, Currency::Usd, dec("900")),
    ];

    // The manager sees only their own deals plus their report's.
    let uc = PipelineReportUseCase {
        deals: MockDealRepo::new(deals),
        stages: MockStageRepo::new(vec![stage.clone()]),
        rates: MockRateRepo::empty(),
        users: MockUserRepo::new(org_users(&org)),
    };

    let report = uc.execute(org.manager_id, Currency::Usd).await.unwrap();

    assert_eq!(report.total_value, dec("100"));
    assert_eq!(report.counts_by_stage[&stage.id], 1);
}

#[tokio::test]
async fn should_convert_foreign_currency_deals_at_latest_rate() {
    let org = OrgFixture::new();
    let stage = test_stage("Prospecting", 0);
    let deals = vec![
        test_deal(org.report_id, stage.id, Currency::Usd, dec("100")),
        test_deal(org.report_id, stage.id, Currency::Ars, dec("50000")),
    ];

    let uc = PipelineReportUseCase {
        deals: MockDealRepo::new(deals),
        stages: MockStageRepo::new(vec![stage.clone()]),
        rates: MockRateRepo::new(vec![test_rate(dec("1000"))]),
        users: MockUserRepo::new(org_users(&org)),
    };

    let report = uc.execute(org.admin_id, Currency::Usd).await.unwrap();

    // 100 USD + 50000 ARS / 1000.
    assert_eq!(report.total_value, dec("150.00"));
}

#[tokio::test]
async fn should_fail_when_conversion_needed_without_rate() {
    let org = OrgFixture::new();
    let stage = test_stage("Prospecting", 0);
    let deals = vec![test_deal(org.report_id, stage.id, Currency::Ars, dec("50000"))];

    let uc = PipelineReportUseCase {
        deals: MockDealRepo::new(deals),
        stages: MockStageRepo::new(vec![stage]),
        rates: MockRateRepo::empty(),
        users: MockUserRepo::new(org_users(&org)),
    };

    let result = uc.execute(org.admin_id, Currency::Usd).await;

    assert!(
        matches!(result, Err(CrmServiceError::RateUnavailable)),
        "expected RateUnavailable, got {result:?}"
    );
}

#[tokio::test]
async fn should_not_require_rate_for_identity_only_report() {
    let org = OrgFixture::new();
    let stage = test_stage("Prospecting", 0);
    let deals = vec![test_deal(org.report_id, stage.id, Currency::Usd, dec("75"))];

    let uc = PipelineReportUseCase {
        deals: MockDealRepo::new(deals),
        stages: MockStageRepo::new(vec![stage]),
        rates: MockRateRepo::empty(),
        users: MockUserRepo::new(org_users(&org)),
    };

    let report = uc.execute(org.admin_id, Currency::Usd).await.unwrap();
    assert_eq!(report.total_value, dec("75"));
}
