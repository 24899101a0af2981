use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use cierre_domain::currency::Currency;
use cierre_domain::level::UserLevel;
use cierre_testing::org::OrgFixture;

use cierre_crm::domain::repository::{
    AccessRequestRepository, CompanyRepository, ContactRepository, DealRepository,
    ExchangeRateRepository, StageRepository, UserRepository,
};
use cierre_crm::domain::types::{
    Company, Contact, ContactAccessRequest, Deal, DealStage, ExchangeRate, RequestStatus, User,
};
use cierre_crm::error::CrmServiceError;

pub fn test_user(
    id: Uuid,
    level: UserLevel,
    manager_id: Option<Uuid>,
    team_id: Option<Uuid>,
) -> User {
    let now = Utc::now();
    User {
        id,
        name: format!("user-{}", &id.to_string()[..8]),
        email: format!("{id}@cierre.test"),
        role: "sales".to_owned(),
        level,
        manager_id,
        team_id,
        created_at: now,
        updated_at: now,
    }
}

/// All five fixture members as full user records.
pub fn org_users(org: &OrgFixture) -> Vec<User> {
    org.rows()
        .into_iter()
        .map(|(id, level, manager_id, team_id)| test_user(id, level, manager_id, team_id))
        .collect()
}

pub fn test_company(assigned_team_id: Option<Uuid>, is_global: bool) -> Company {
    let now = Utc::now();
    Company {
        id: Uuid::now_v7(),
        name: "Acme".to_owned(),
        assigned_team_id,
        is_global,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_contact(company_id: Uuid) -> Contact {
    let now = Utc::now();
    Contact {
        id: Uuid::now_v7(),
        company_id,
        name: "Jane Doe".to_owned(),
        email: Some("jane@acme.test".to_owned()),
        phone: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_stage(name: &str, order_index: i32) -> DealStage {
    DealStage {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        order_index,
        color: "#6b7280".to_owned(),
        is_default: order_index == 0,
        is_active: true,
        company_owner_id: None,
        created_at: Utc::now(),
    }
}

pub fn test_deal(owner_id: Uuid, stage_id: Uuid, currency: Currency, amount: Decimal) -> Deal {
    let now = Utc::now();
    let (amount_usd, amount_ars) = match currency {
        Currency::Usd => (amount, Decimal::ZERO),
        Currency::Ars => (Decimal::ZERO, amount),
    };
    Deal {
        id: Uuid::now_v7(),
        user_id: owner_id,
        company_id: Uuid::now_v7(),
        contact_id: None,
        stage_id,
        title: "deal".to_owned(),
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

pub fn test_rate(usd_to_ars: Decimal) -> ExchangeRate {
    ExchangeRate {
        id: Uuid::now_v7(),
        date: Utc::now().date_naive(),
        usd_to_ars,
        source: "manual".to_owned(),
        created_at: Utc::now(),
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Vec<User>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn empty() -> Self {
        Self { users: vec![] }
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CrmServiceError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, CrmServiceError> {
        Ok(self.users.clone())
    }

    async fn create(&self, _user: &User) -> Result<(), CrmServiceError> {
        Ok(())
    }

    async fn update(&self, _user: &User) -> Result<(), CrmServiceError> {
        Ok(())
    }
}

// ── MockCompanyRepo ──────────────────────────────────────────────────────────

pub struct MockCompanyRepo {
    pub companies: Vec<Company>,
}

impl MockCompanyRepo {
    pub fn new(companies: Vec<Company>) -> Self {
        Self { companies }
    }
}

impl CompanyRepository for MockCompanyRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, CrmServiceError> {
        Ok(self.companies.iter().find(|c| c.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Company>, CrmServiceError> {
        Ok(self.companies.clone())
    }

    async fn create(&self, _company: &Company) -> Result<(), CrmServiceError> {
        Ok(())
    }

    async fn update(&self, _company: &Company) -> Result<(), CrmServiceError> {
        Ok(())
    }
}

// ── MockContactRepo ──────────────────────────────────────────────────────────

pub struct MockContactRepo {
    pub contacts: Vec<Contact>,
}

impl MockContactRepo {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }
}

impl ContactRepository for MockContactRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, CrmServiceError> {
        Ok(self.contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Contact>, CrmServiceError> {
        Ok(self.contacts.clone())
    }

    async fn create(&self, _contact: &Contact) -> Result<(), CrmServiceError> {
        Ok(())
    }
}

// ── MockAccessRequestRepo ────────────────────────────────────────────────────

/// Backed by shared state so a guarded review mutates the same rows a later
/// call observes, the way the real table behaves.
pub struct MockAccessRequestRepo {
    pub requests: Arc<Mutex<Vec<ContactAccessRequest>>>,
}

impl MockAccessRequestRepo {
    pub fn new(requests: Vec<ContactAccessRequest>) -> Self {
        Self {
            requests: Arc::new(Mutex::new(requests)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle for post-execution inspection.
    pub fn requests_handle(&self) -> Arc<Mutex<Vec<ContactAccessRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl AccessRequestRepository for MockAccessRequestRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContactAccessRequest>, CrmServiceError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<ContactAccessRequest>, CrmServiceError> {
        let mut all = self.requests.lock().unwrap().clone();
        all.sort_by_key(|r| r.status != RequestStatus::Pending);
        Ok(all)
    }

    async fn find_by_requester(
        &self,
        requester_id: Uuid,
    ) -> Result<Vec<ContactAccessRequest>, CrmServiceError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect())
    }

    async fn find_approved_contact_ids(
        &self,
        requester_id: Uuid,
    ) -> Result<Vec<Uuid>, CrmServiceError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.requester_id == requester_id && r.status == RequestStatus::Approved)
            .map(|r| r.contact_id)
            .collect())
    }

    async fn create(&self, request: &ContactAccessRequest) -> Result<(), CrmServiceError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn mark_reviewed(
        &self,
        id: Uuid,
        status: RequestStatus,
        reviewer_id: Uuid,
    ) -> Result<bool, CrmServiceError> {
        let mut requests = self.requests.lock().unwrap();
        match requests
            .iter_mut()
            .find(|r| r.id == id && r.status == RequestStatus::Pending)
        {
            Some(request) => {
                request.status = status;
                request.reviewed_by = Some(reviewer_id);
                request.reviewed_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockDealRepo ─────────────────────────────────────────────────────────────

pub struct MockDealRepo {
    pub deals: Vec<Deal>,
}

impl MockDealRepo {
    pub fn new(deals: Vec<Deal>) -> Self {
        Self { deals }
    }
}

impl DealRepository for MockDealRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Deal>, CrmServiceError> {
        Ok(self.deals.iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_owners(&self, owner_ids: &[Uuid]) -> Result<Vec<Deal>, CrmServiceError> {
        Ok(self
            .deals
            .iter()
            .filter(|d| owner_ids.contains(&d.user_id))
            .cloned()
            .collect())
    }

    async fn create(&self, _deal: &Deal) -> Result<(), CrmServiceError> {
        Ok(())
    }
}

// ── MockStageRepo ────────────────────────────────────────────────────────────

pub struct MockStageRepo {
    pub stages: Vec<DealStage>,
    pub created: Arc<Mutex<Vec<DealStage>>>,
}

impl MockStageRepo {
    pub fn new(stages: Vec<DealStage>) -> Self {
        Self {
            stages,
            created: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn created_handle(&self) -> Arc<Mutex<Vec<DealStage>>> {
        Arc::clone(&self.created)
    }
}

impl StageRepository for MockStageRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<DealStage>, CrmServiceError> {
        Ok(self.stages.iter().find(|s| s.id == id).cloned())
    }

    async fn find_active(&self) -> Result<Vec<DealStage>, CrmServiceError> {
        let mut active: Vec<DealStage> =
            self.stages.iter().filter(|s| s.is_active).cloned().collect();
        active.sort_by_key(|s| s.order_index);
        Ok(active)
    }

    async fn find_all(&self) -> Result<Vec<DealStage>, CrmServiceError> {
        Ok(self.stages.clone())
    }

    async fn create(&self, stage: &DealStage) -> Result<(), CrmServiceError> {
        self.created.lock().unwrap().push(stage.clone());
        Ok(())
    }
}

// ── MockRateRepo ─────────────────────────────────────────────────────────────

pub struct MockRateRepo {
    pub rates: Arc<Mutex<Vec<ExchangeRate>>>,
}

impl MockRateRepo {
    pub fn new(rates: Vec<ExchangeRate>) -> Self {
        Self {
            rates: Arc::new(Mutex::new(rates)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn rates_handle(&self) -> Arc<Mutex<Vec<ExchangeRate>>> {
        Arc::clone(&self.rates)
    }
}

impl ExchangeRateRepository for MockRateRepo {
    async fn latest(&self) -> Result<Option<ExchangeRate>, CrmServiceError> {
        Ok(self
            .rates
            .lock()
            .unwrap()
            .iter()
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<ExchangeRate>, CrmServiceError> {
        Ok(self
            .rates
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.date == date)
            .cloned())
    }

    async fn create(&self, rate: &ExchangeRate) -> Result<(), CrmServiceError> {
        self.rates.lock().unwrap().push(rate.clone());
        Ok(())
    }

    async fn update(&self, rate: &ExchangeRate) -> Result<(), CrmServiceError> {
        let mut rates = self.rates.lock().unwrap();
        if let Some(existing) = rates.iter_mut().find(|r| r.id == rate.id) {
            *existing = rate.clone();
        }
        Ok(())
    }
}
