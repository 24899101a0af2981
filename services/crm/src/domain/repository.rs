#![allow(async_fn_in_trait)]

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::types::{
    Branding, Company, Contact, ContactAccessRequest, Deal, DealStage, ExchangeRate, RequestStatus,
    Team, User,
};
use crate::error::CrmServiceError;

/// Repository for CRM users.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CrmServiceError>;
    async fn find_all(&self) -> Result<Vec<User>, CrmServiceError>;
    async fn create(&self, user: &User) -> Result<(), CrmServiceError>;
    async fn update(&self, user: &User) -> Result<(), CrmServiceError>;
}

/// Repository for sales teams.
pub trait TeamRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, CrmServiceError>;
    async fn find_all(&self) -> Result<Vec<Team>, CrmServiceError>;
    async fn create(&self, team: &Team) -> Result<(), CrmServiceError>;
    async fn update(&self, team: &Team) -> Result<(), CrmServiceError>;
}

/// Repository for customer companies.
pub trait CompanyRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, CrmServiceError>;
    async fn find_all(&self) -> Result<Vec<Company>, CrmServiceError>;
    async fn create(&self, company: &Company) -> Result<(), CrmServiceError>;
    async fn update(&self, company: &Company) -> Result<(), CrmServiceError>;
}

/// Repository for contacts.
pub trait ContactRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, CrmServiceError>;
    async fn find_all(&self) -> Result<Vec<Contact>, CrmServiceError>;
    async fn create(&self, contact: &Contact) -> Result<(), CrmServiceError>;
}

/// Repository for contact access requests.
pub trait AccessRequestRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContactAccessRequest>, CrmServiceError>;

    /// All requests, pending first, newest first within each status.
    async fn find_all(&self) -> Result<Vec<ContactAccessRequest>, CrmServiceError>;

    async fn find_by_requester(
        &self,
        requester_id: Uuid,
    ) -> Result<Vec<ContactAccessRequest>, CrmServiceError>;

    /// Contact ids with an approved request for this requester. Feeds the
    /// contact-visibility overlay.
    async fn find_approved_contact_ids(
        &self,
        requester_id: Uuid,
    ) -> Result<Vec<Uuid>, CrmServiceError>;

    async fn create(&self, request: &ContactAccessRequest) -> Result<(), CrmServiceError>;

    /// Transition a request out of `pending`. The update is conditioned on
    /// the row still being `pending`; returns `false` when no row matched,
    /// meaning a concurrent reviewer got there first.
    async fn mark_reviewed(
        &self,
        id: Uuid,
        status: RequestStatus,
        reviewer_id: Uuid,
    ) -> Result<bool, CrmServiceError>;
}

/// Repository for deals.
pub trait DealRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Deal>, CrmServiceError>;
    async fn find_by_owners(&self, owner_ids: &[Uuid]) -> Result<Vec<Deal>, CrmServiceError>;
    async fn create(&self, deal: &Deal) -> Result<(), CrmServiceError>;
}

/// Repository for pipeline stages.
pub trait StageRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<DealStage>, CrmServiceError>;

    /// Active stages ordered by `order_index` ascending.
    async fn find_active(&self) -> Result<Vec<DealStage>, CrmServiceError>;

    async fn find_all(&self) -> Result<Vec<DealStage>, CrmServiceError>;
    async fn create(&self, stage: &DealStage) -> Result<(), CrmServiceError>;
}

/// Repository for USD→ARS exchange rates.
pub trait ExchangeRateRepository: Send + Sync {
    /// Most recently created rate, regardless of date.
    async fn latest(&self) -> Result<Option<ExchangeRate>, CrmServiceError>;

    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<ExchangeRate>, CrmServiceError>;
    async fn create(&self, rate: &ExchangeRate) -> Result<(), CrmServiceError>;

    /// Overwrite the rate value and source of an existing row.
    async fn update(&self, rate: &ExchangeRate) -> Result<(), CrmServiceError>;
}

/// Repository for the single-row branding settings.
pub trait BrandingRepository: Send + Sync {
    async fn get(&self) -> Result<Option<Branding>, CrmServiceError>;
    async fn upsert(&self, branding: &Branding) -> Result<(), CrmServiceError>;
}
