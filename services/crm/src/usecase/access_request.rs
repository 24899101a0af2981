use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{AccessRequestRepository, ContactRepository, UserRepository};
use crate::domain::types::{ContactAccessRequest, RequestStatus};
use crate::error::CrmServiceError;

/// Review verb from the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "approve" => Some(Self::Approve),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }

    fn target_status(self) -> RequestStatus {
        match self {
            Self::Approve => RequestStatus::Approved,
            Self::Reject => RequestStatus::Rejected,
        }
    }
}

// ── CreateAccessRequest ──────────────────────────────────────────────────────

pub struct CreateAccessRequestInput {
    pub contact_id: Uuid,
    pub reason: String,
}

pub struct CreateAccessRequestUseCase<
    A: AccessRequestRepository,
    K: ContactRepository,
    U: UserRepository,
> {
    pub requests: A,
    pub contacts: K,
    pub users: U,
}

impl<A, K, U> CreateAccessRequestUseCase<A, K, U>
where
    A: AccessRequestRepository,
    K: ContactRepository,
    U: UserRepository,
{
    pub async fn execute(
        &self,
        requester_id: Uuid,
        input: CreateAccessRequestInput,
    ) -> Result<ContactAccessRequest, CrmServiceError> {
        let requester = self
            .users
            .find_by_id(requester_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        // Admins already see every contact; a request from one is a client
        // bug, rejected before any row is written.
        if requester.level.is_admin() {
            return Err(CrmServiceError::BadRequest);
        }
        if self.contacts.find_by_id(input.contact_id).await?.is_none() {
            return Err(CrmServiceError::ContactNotFound);
        }
        let request = ContactAccessRequest {
            id: Uuid::now_v7(),
            requester_id,
            contact_id: input.contact_id,
            status: RequestStatus::Pending,
            reason: input.reason,
            reviewed_by: None,
            reviewed_at: None,
            created_at: Utc::now(),
        };
        self.requests.create(&request).await?;
        Ok(request)
    }
}

// ── ListAccessRequests ───────────────────────────────────────────────────────

pub struct ListAccessRequestsUseCase<A: AccessRequestRepository, U: UserRepository> {
    pub requests: A,
    pub users: U,
}

impl<A: AccessRequestRepository, U: UserRepository> ListAccessRequestsUseCase<A, U> {
    /// Admins see the full queue; everyone else sees only their own requests.
    pub async fn execute(
        &self,
        actor_id: Uuid,
    ) -> Result<Vec<ContactAccessRequest>, CrmServiceError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        if actor.level.is_admin() {
            self.requests.find_all().await
        } else {
            self.requests.find_by_requester(actor_id).await
        }
    }
}

// ── ReviewAccessRequest ──────────────────────────────────────────────────────

pub struct ReviewAccessRequestUseCase<A: AccessRequestRepository, U: UserRepository> {
    pub requests: A,
    pub users: U,
}

impl<A: AccessRequestRepository, U: UserRepository> ReviewAccessRequestUseCase<A, U> {
    pub async fn execute(
        &self,
        reviewer_id: Uuid,
        request_id: Uuid,
        action: ReviewAction,
    ) -> Result<ContactAccessRequest, CrmServiceError> {
        let reviewer = self
            .users
            .find_by_id(reviewer_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        if !reviewer.level.is_admin() {
            return Err(CrmServiceError::Forbidden);
        }
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or(CrmServiceError::RequestNotFound)?;
        if request.status.is_terminal() {
            return Err(CrmServiceError::Conflict);
        }
        // The store transition is guarded on status = 'pending'; a false
        // return means another reviewer won the race after our read.
        let status = action.target_status();
        if !self
            .requests
            .mark_reviewed(request_id, status, reviewer_id)
            .await?
        {
            return Err(CrmServiceError::Conflict);
        }
        Ok(ContactAccessRequest {
            status,
            reviewed_by: Some(reviewer_id),
            reviewed_at: Some(Utc::now()),
            ..request
        })
    }
}
