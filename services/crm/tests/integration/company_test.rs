use uuid::Uuid;

use cierre_crm::error::CrmServiceError;
use cierre_crm::usecase::company::ListCompaniesUseCase;
use cierre_crm::usecase::contact::{GetContactUseCase, ListContactsUseCase};
use cierre_crm::domain::types::{ContactAccessRequest, RequestStatus};
use cierre_testing::org::OrgFixture;

use crate::helpers::{
    MockAccessRequestRepo, MockCompanyRepo, MockContactRepo, MockUserRepo, org_users,
    test_company, test_contact,
};

#[tokio::test]
async fn should_show_all_companies_to_admin() {
    let org = OrgFixture::new();
    let companies = vec![
        test_company(Some(org.sales_team_id), false),
        test_company(Some(org.support_team_id), false),
        test_company(None, false),
    ];

    let uc = ListCompaniesUseCase {
        companies: MockCompanyRepo::new(companies.clone()),
        users: MockUserRepo::new(org_users(&org)),
    };
    let visible = uc.execute(org.admin_id).await.unwrap();

    assert_eq!(visible.len(), companies.len());
}

#[tokio::test]
async fn should_filter_companies_to_global_and_own_team() {
    let org = OrgFixture::new();
    let own_team = test_company(Some(org.sales_team_id), false);
    let foreign = test_company(Some(org.support_team_id), false);
    let global = test_company(None, true);

    let uc = ListCompaniesUseCase {
        companies: MockCompanyRepo::new(vec![own_team.clone(), foreign, global.clone()]),
        users: MockUserRepo::new(org_users(&org)),
    };
    let visible = uc.execute(org.leader_id).await.unwrap();

    let mut ids: Vec<Uuid> = visible.iter().map(|c| c.id).collect();
    ids.sort();
    let mut expected = vec![own_team.id, global.id];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn should_inherit_contact_visibility_from_company() {
    let org = OrgFixture::new();
    let own_team = test_company(Some(org.sales_team_id), false);
    let foreign = test_company(Some(org.support_team_id), false);
    let visible_contact = test_contact(own_team.id);
    let hidden_contact = test_contact(foreign.id);

    let uc = ListContactsUseCase {
        contacts: MockContactRepo::new(vec![visible_contact.clone(), hidden_contact]),
        companies: MockCompanyRepo::new(vec![own_team, foreign]),
        requests: MockAccessRequestRepo::empty(),
        users: MockUserRepo::new(org_users(&org)),
    };
    let visible = uc.execute(org.report_id).await.unwrap();

    let ids: Vec<Uuid> = visible.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![visible_contact.id]);
}

#[tokio::test]
async fn should_overlay_approved_request_for_single_contact_only() {
    let org = OrgFixture::new();
    let foreign = test_company(Some(org.support_team_id), false);
    let granted = test_contact(foreign.id);
    let sibling = test_contact(foreign.id);

    let approval = ContactAccessRequest {
        id: Uuid::now_v7(),
        requester_id: org.report_id,
        contact_id: granted.id,
        status: RequestStatus::Approved,
        reason: "cross-team deal".to_owned(),
        reviewed_by: Some(org.admin_id),
        reviewed_at: Some(chrono::Utc::now()),
        created_at: chrono::Utc::now(),
    };

    let uc = ListContactsUseCase {
        contacts: MockContactRepo::new(vec![granted.clone(), sibling.clone()]),
        companies: MockCompanyRepo::new(vec![foreign.clone()]),
        requests: MockAccessRequestRepo::new(vec![approval]),
        users: MockUserRepo::new(org_users(&org)),
    };
    let visible = uc.execute(org.report_id).await.unwrap();

    // The grant covers exactly one contact — not siblings, not the company.
    let ids: Vec<Uuid> = visible.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![granted.id]);

    let get = GetContactUseCase {
        contacts: MockContactRepo::new(vec![granted.clone(), sibling.clone()]),
        companies: MockCompanyRepo::new(vec![foreign]),
        requests: MockAccessRequestRepo::empty(),
        users: MockUserRepo::new(org_users(&org)),
    };
    let denied = get.execute(org.report_id, sibling.id).await;
    assert!(
        matches!(denied, Err(CrmServiceError::Forbidden)),
        "expected Forbidden for sibling contact, got {denied:?}"
    );
}

#[tokio::test]
async fn should_ignore_pending_and_rejected_requests_in_overlay() {
    let org = OrgFixture::new();
    let foreign = test_company(Some(org.support_team_id), false);
    let contact = test_contact(foreign.id);

    for status in [RequestStatus::Pending, RequestStatus::Rejected] {
        let request = ContactAccessRequest {
            id: Uuid::now_v7(),
            requester_id: org.report_id,
            contact_id: contact.id,
            status,
            reason: String::new(),
            reviewed_by: None,
            reviewed_at: None,
            created_at: chrono::Utc::now(),
        };
        let uc = ListContactsUseCase {
            contacts: MockContactRepo::new(vec![contact.clone()]),
            companies: MockCompanyRepo::new(vec![foreign.clone()]),
            requests: MockAccessRequestRepo::new(vec![request]),
            users: MockUserRepo::new(org_users(&org)),
        };
        let visible = uc.execute(org.report_id).await.unwrap();
        assert!(
            visible.is_empty(),
            "a {status:?} request must not grant visibility"
        );
    }
}
