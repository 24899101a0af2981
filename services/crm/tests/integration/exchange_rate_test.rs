use rust_decimal::Decimal;

use cierre_crm::error::CrmServiceError;
use cierre_crm::usecase::exchange_rate::{
    LatestRateUseCase, RecordRateInput, RecordRateUseCase,
};
use cierre_testing::org::OrgFixture;

use crate::helpers::{MockRateRepo, MockUserRepo, org_users};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[tokio::test]
async fn should_fail_latest_lookup_on_empty_table() {
    let uc = LatestRateUseCase {
        rates: MockRateRepo::empty(),
    };
    let result = uc.execute().await;
    assert!(
        matches!(result, Err(CrmServiceError::RateUnavailable)),
        "expected RateUnavailable, got {result:?}"
    );
}

#[tokio::test]
async fn should_insert_then_reuse_todays_row() {
    let org = OrgFixture::new();
    let rates = MockRateRepo::empty();
    let handle = rates.rates_handle();

    let uc = RecordRateUseCase {
        rates,
        users: MockUserRepo::new(org_users(&org)),
    };

    let first = uc
        .execute(
            org.admin_id,
            RecordRateInput {
                usd_to_ars: dec("950"),
                source: "bcra".to_owned(),
            },
        )
        .await
        .unwrap();

    // Second write on the same day must overwrite, not duplicate.
    let second = uc
        .execute(
            org.admin_id,
            RecordRateInput {
                usd_to_ars: dec("975.50"),
                source: "bcra".to_owned(),
            },
        )
        .await
        .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.usd_to_ars, dec("975.50"));
    let stored = handle.lock().unwrap();
    assert_eq!(stored.len(), 1, "same-day writes share one row");
    assert_eq!(stored[0].usd_to_ars, dec("975.50"));
}

#[tokio::test]
async fn should_surface_latest_recorded_rate() {
    let org = OrgFixture::new();
    let rates = MockRateRepo::empty();
    let handle = rates.rates_handle();

    let record = RecordRateUseCase {
        rates,
        users: MockUserRepo::new(org_users(&org)),
    };
    record
        .execute(
            org.admin_id,
            RecordRateInput {
                usd_to_ars: dec("1012.25"),
                source: "manual".to_owned(),
            },
        )
        .await
        .unwrap();

    let latest = LatestRateUseCase {
        rates: MockRateRepo { rates: handle },
    };
    let rate = latest.execute().await.unwrap();
    assert_eq!(rate.usd_to_ars, dec("1012.25"));
}

#[tokio::test]
async fn should_reject_invalid_rate_and_non_admin_writer() {
    let org = OrgFixture::new();
    let rates = MockRateRepo::empty();
    let handle = rates.rates_handle();

    let uc = RecordRateUseCase {
        rates,
        users: MockUserRepo::new(org_users(&org)),
    };

    let zero = uc
        .execute(
            org.admin_id,
            RecordRateInput {
                usd_to_ars: Decimal::ZERO,
                source: "manual".to_owned(),
            },
        )
        .await;
    assert!(matches!(zero, Err(CrmServiceError::Validation(_))));

    let forbidden = uc
        .execute(
            org.leader_id,
            RecordRateInput {
                usd_to_ars: dec("1000"),
                source: "manual".to_owned(),
            },
        )
        .await;
    assert!(matches!(forbidden, Err(CrmServiceError::Forbidden)));

    assert!(handle.lock().unwrap().is_empty());
}
