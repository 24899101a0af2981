use cierre_crm::domain::types::RequestStatus;
use cierre_crm::error::CrmServiceError;
use cierre_crm::usecase::access_request::{
    CreateAccessRequestInput, CreateAccessRequestUseCase, ReviewAccessRequestUseCase, ReviewAction,
};
use cierre_testing::org::OrgFixture;

use crate::helpers::{
    MockAccessRequestRepo, MockContactRepo, MockUserRepo, org_users, test_company, test_contact,
};

#[tokio::test]
async fn should_reject_admin_access_request_before_any_write() {
    let org = OrgFixture::new();
    let contact = test_contact(test_company(None, true).id);

    let requests = MockAccessRequestRepo::empty();
    let handle = requests.requests_handle();

    let uc = CreateAccessRequestUseCase {
        requests,
        contacts: MockContactRepo::new(vec![contact.clone()]),
        users: MockUserRepo::new(org_users(&org)),
    };

    let result = uc
        .execute(
            org.admin_id,
            CreateAccessRequestInput {
                contact_id: contact.id,
                reason: "should never land".to_owned(),
            },
        )
        .await;

    assert!(
        matches!(result, Err(CrmServiceError::BadRequest)),
        "expected BadRequest, got {result:?}"
    );
    assert!(
        handle.lock().unwrap().is_empty(),
        "no row may be written for a rejected create"
    );
}

#[tokio::test]
async fn should_create_pending_request_then_approve_once() {
    let org = OrgFixture::new();
    let contact = test_contact(test_company(None, true).id);

    let requests = MockAccessRequestRepo::empty();
    let handle = requests.requests_handle();

    let create = CreateAccessRequestUseCase {
        requests,
        contacts: MockContactRepo::new(vec![contact.clone()]),
        users: MockUserRepo::new(org_users(&org)),
    };
    let created = create
        .execute(
            org.report_id,
            CreateAccessRequestInput {
                contact_id: contact.id,
                reason: "deal prep".to_owned(),
            },
        )
        .await
        .unwrap();
    assert_eq!(created.status, RequestStatus::Pending);

    let review = ReviewAccessRequestUseCase {
        requests: MockAccessRequestRepo {
            requests: handle.clone(),
        },
        users: MockUserRepo::new(org_users(&org)),
    };
    let reviewed = review
        .execute(org.admin_id, created.id, ReviewAction::Approve)
        .await
        .unwrap();

    assert_eq!(reviewed.status, RequestStatus::Approved);
    assert_eq!(reviewed.reviewed_by, Some(org.admin_id));
    let stored = handle.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, RequestStatus::Approved);
}

#[tokio::test]
async fn should_conflict_on_second_review_of_same_request() {
    let org = OrgFixture::new();
    let contact = test_contact(test_company(None, true).id);

    let requests = MockAccessRequestRepo::empty();
    let handle = requests.requests_handle();
    let create = CreateAccessRequestUseCase {
        requests,
        contacts: MockContactRepo::new(vec![contact.clone()]),
        users: MockUserRepo::new(org_users(&org)),
    };
    let created = create
        .execute(
            org.loner_id,
            CreateAccessRequestInput {
                contact_id: contact.id,
                reason: String::new(),
            },
        )
        .await
        .unwrap();

    let review = ReviewAccessRequestUseCase {
        requests: MockAccessRequestRepo { requests: handle },
        users: MockUserRepo::new(org_users(&org)),
    };
    review
        .execute(org.admin_id, created.id, ReviewAction::Approve)
        .await
        .unwrap();

    // The terminal state is final; re-review must not silently re-apply.
    let second = review
        .execute(org.admin_id, created.id, ReviewAction::Reject)
        .await;
    assert!(
        matches!(second, Err(CrmServiceError::Conflict)),
        "expected Conflict, got {second:?}"
    );
}

#[tokio::test]
async fn should_forbid_review_below_admin_level() {
    let org = OrgFixture::new();
    let contact = test_contact(test_company(None, true).id);

    let requests = MockAccessRequestRepo::empty();
    let handle = requests.requests_handle();
    let create = CreateAccessRequestUseCase {
        requests,
        contacts: MockContactRepo::new(vec![contact.clone()]),
        users: MockUserRepo::new(org_users(&org)),
    };
    let created = create
        .execute(
            org.report_id,
            CreateAccessRequestInput {
                contact_id: contact.id,
                reason: String::new(),
            },
        )
        .await
        .unwrap();

    let review = ReviewAccessRequestUseCase {
        requests: MockAccessRequestRepo {
            requests: handle.clone(),
        },
        users: MockUserRepo::new(org_users(&org)),
    };
    for reviewer in [org.leader_id, org.manager_id, org.loner_id] {
        let result = review
            .execute(reviewer, created.id, ReviewAction::Approve)
            .await;
        assert!(
            matches!(result, Err(CrmServiceError::Forbidden)),
            "expected Forbidden for non-admin reviewer, got {result:?}"
        );
    }
    assert_eq!(
        handle.lock().unwrap()[0].status,
        RequestStatus::Pending,
        "denied reviews must not transition the request"
    );
}
