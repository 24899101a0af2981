use uuid::Uuid;

use cierre_crm::error::CrmServiceError;
use cierre_crm::usecase::visibility::ResolveVisibleUsersUseCase;
use cierre_testing::org::OrgFixture;

use crate::helpers::{MockUserRepo, org_users};

fn sorted_ids(users: &[cierre_crm::domain::types::User]) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn should_resolve_every_user_for_admin() {
    let org = OrgFixture::new();
    let users = org_users(&org);
    let uc = ResolveVisibleUsersUseCase {
        repo: MockUserRepo::new(users.clone()),
    };

    let visible = uc.execute(org.admin_id).await.unwrap();

    assert_eq!(sorted_ids(&visible), sorted_ids(&users));
}

#[tokio::test]
async fn should_resolve_team_members_for_leader() {
    let org = OrgFixture::new();
    let uc = ResolveVisibleUsersUseCase {
        repo: MockUserRepo::new(org_users(&org)),
    };

    let visible = uc.execute(org.leader_id).await.unwrap();

    // The leader and the manager's report share the sales team.
    let mut expected = vec![org.leader_id, org.report_id];
    expected.sort();
    assert_eq!(sorted_ids(&visible), expected);
}

#[tokio::test]
async fn should_resolve_direct_reports_for_manager() {
    let org = OrgFixture::new();
    let uc = ResolveVisibleUsersUseCase {
        repo: MockUserRepo::new(org_users(&org)),
    };

    let visible = uc.execute(org.manager_id).await.unwrap();

    let mut expected = vec![org.manager_id, org.report_id];
    expected.sort();
    assert_eq!(sorted_ids(&visible), expected);
}

#[tokio::test]
async fn should_resolve_only_self_for_contributor() {
    let org = OrgFixture::new();
    let uc = ResolveVisibleUsersUseCase {
        repo: MockUserRepo::new(org_users(&org)),
    };

    let visible = uc.execute(org.loner_id).await.unwrap();
    assert_eq!(sorted_ids(&visible), vec![org.loner_id]);

    // A contributor inside a team still sees nobody else.
    let visible = uc.execute(org.report_id).await.unwrap();
    assert_eq!(sorted_ids(&visible), vec![org.report_id]);
}

#[tokio::test]
async fn should_fail_with_user_not_found_for_deleted_requester() {
    let org = OrgFixture::new();
    let uc = ResolveVisibleUsersUseCase {
        repo: MockUserRepo::new(org_users(&org)),
    };

    let result = uc.execute(Uuid::now_v7()).await;

    assert!(
        matches!(result, Err(CrmServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}
