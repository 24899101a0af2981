use cierre_crm::usecase::stage::{CreateStageInput, CreateStageUseCase, ListStagesUseCase};
use cierre_testing::org::OrgFixture;

use crate::helpers::{MockStageRepo, MockUserRepo, org_users, test_stage};

#[tokio::test]
async fn should_list_active_stages_in_pipeline_order() {
    let mut inactive = test_stage("Old Stage", 1);
    inactive.is_active = false;
    let stages = vec![test_stage("Negotiation", 2), test_stage("Prospecting", 0), inactive];

    let uc = ListStagesUseCase {
        stages: MockStageRepo::new(stages),
    };
    let listed = uc.execute().await.unwrap();

    let names: Vec<&str> = listed.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Prospecting", "Negotiation"]);
}

#[tokio::test]
async fn should_append_created_stage_after_highest_order() {
    let org = OrgFixture::new();
    let repo = MockStageRepo::new(vec![test_stage("A", 0), test_stage("B", 2), test_stage("C", 5)]);
    let created_handle = repo.created_handle();

    let uc = CreateStageUseCase {
        stages: repo,
        users: MockUserRepo::new(org_users(&org)),
    };
    let created = uc
        .execute(
            org.admin_id,
            CreateStageInput {
                name: "Closed Won".to_owned(),
                color: "#16a34a".to_owned(),
                is_default: false,
            },
        )
        .await
        .unwrap();

    assert_eq!(created.order_index, 6);
    assert_eq!(created_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_start_order_at_zero_for_empty_pipeline() {
    let org = OrgFixture::new();
    let uc = CreateStageUseCase {
        stages: MockStageRepo::new(vec![]),
        users: MockUserRepo::new(org_users(&org)),
    };
    let created = uc
        .execute(
            org.admin_id,
            CreateStageInput {
                name: "Prospecting".to_owned(),
                color: "#6b7280".to_owned(),
                is_default: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(created.order_index, 0);
}
