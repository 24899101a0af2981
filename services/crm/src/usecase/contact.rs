use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{
    AccessRequestRepository, CompanyRepository, ContactRepository, UserRepository,
};
use crate::domain::types::{Contact, User};
use crate::error::CrmServiceError;
use crate::usecase::visibility::visible_companies;

/// Visible-company ids plus the approved-request overlay for one user.
/// A contact is visible iff its company is visible or the contact id is in
/// the overlay; the overlay grants that single contact only.
struct ContactScope {
    company_ids: HashSet<Uuid>,
    granted_contact_ids: HashSet<Uuid>,
}

impl ContactScope {
    fn allows(&self, contact: &Contact) -> bool {
        self.company_ids.contains(&contact.company_id)
            || self.granted_contact_ids.contains(&contact.id)
    }
}

async fn contact_scope<C: CompanyRepository, A: AccessRequestRepository>(
    companies: &C,
    requests: &A,
    actor: &User,
) -> Result<ContactScope, CrmServiceError> {
    let company_ids = visible_companies(actor, companies.find_all().await?)
        .into_iter()
        .map(|c| c.id)
        .collect();
    // Admins never file requests; skip the overlay query for them.
    let granted_contact_ids = if actor.level.is_admin() {
        HashSet::new()
    } else {
        requests
            .find_approved_contact_ids(actor.id)
            .await?
            .into_iter()
            .collect()
    };
    Ok(ContactScope { company_ids, granted_contact_ids })
}

// ── ListContacts ─────────────────────────────────────────────────────────────

pub struct ListContactsUseCase<
    K: ContactRepository,
    C: CompanyRepository,
    A: AccessRequestRepository,
    U: UserRepository,
> {
    pub contacts: K,
    pub companies: C,
    pub requests: A,
    pub users: U,
}

impl<K, C, A, U> ListContactsUseCase<K, C, A, U>
where
    K: ContactRepository,
    C: CompanyRepository,
    A: AccessRequestRepository,
    U: UserRepository,
{
    pub async fn execute(&self, actor_id: Uuid) -> Result<Vec<Contact>, CrmServiceError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        let scope = contact_scope(&self.companies, &self.requests, &actor).await?;
        let all = self.contacts.find_all().await?;
        Ok(all.into_iter().filter(|c| scope.allows(c)).collect())
    }
}

// ── GetContact ───────────────────────────────────────────────────────────────

pub struct GetContactUseCase<
    K: ContactRepository,
    C: CompanyRepository,
    A: AccessRequestRepository,
    U: UserRepository,
> {
    pub contacts: K,
    pub companies: C,
    pub requests: A,
    pub users: U,
}

impl<K, C, A, U> GetContactUseCase<K, C, A, U>
where
    K: ContactRepository,
    C: CompanyRepository,
    A: AccessRequestRepository,
    U: UserRepository,
{
    pub async fn execute(
        &self,
        actor_id: Uuid,
        contact_id: Uuid,
    ) -> Result<Contact, CrmServiceError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        let contact = self
            .contacts
            .find_by_id(contact_id)
            .await?
            .ok_or(CrmServiceError::ContactNotFound)?;
        let scope = contact_scope(&self.companies, &self.requests, &actor).await?;
        if !scope.allows(&contact) {
            return Err(CrmServiceError::Forbidden);
        }
        Ok(contact)
    }
}

// ── CreateContact ────────────────────────────────────────────────────────────

pub struct CreateContactInput {
    pub company_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub struct CreateContactUseCase<K: ContactRepository, C: CompanyRepository, U: UserRepository> {
    pub contacts: K,
    pub companies: C,
    pub users: U,
}

impl<K, C, U> CreateContactUseCase<K, C, U>
where
    K: ContactRepository,
    C: CompanyRepository,
    U: UserRepository,
{
    pub async fn execute(
        &self,
        actor_id: Uuid,
        input: CreateContactInput,
    ) -> Result<Contact, CrmServiceError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        let company = self
            .companies
            .find_by_id(input.company_id)
            .await?
            .ok_or(CrmServiceError::CompanyNotFound)?;
        // New contacts can only be filed under a company the actor can see.
        let visible = visible_companies(&actor, vec![company]);
        if visible.is_empty() {
            return Err(CrmServiceError::Forbidden);
        }
        if input.name.trim().is_empty() {
            return Err(CrmServiceError::Validation("name must not be empty".to_owned()));
        }
        let now = Utc::now();
        let contact = Contact {
            id: Uuid::now_v7(),
            company_id: input.company_id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            created_at: now,
            updated_at: now,
        };
        self.contacts.create(&contact).await?;
        Ok(contact)
    }
}
