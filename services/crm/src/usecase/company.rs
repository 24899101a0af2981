use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{CompanyRepository, TeamRepository, UserRepository};
use crate::domain::types::Company;
use crate::error::CrmServiceError;
use crate::usecase::visibility::visible_companies;

// ── ListCompanies ────────────────────────────────────────────────────────────

pub struct ListCompaniesUseCase<C: CompanyRepository, U: UserRepository> {
    pub companies: C,
    pub users: U,
}

impl<C: CompanyRepository, U: UserRepository> ListCompaniesUseCase<C, U> {
    pub async fn execute(&self, actor_id: Uuid) -> Result<Vec<Company>, CrmServiceError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        let all = self.companies.find_all().await?;
        Ok(visible_companies(&actor, all))
    }
}

// ── CreateCompany ────────────────────────────────────────────────────────────

pub struct CreateCompanyInput {
    pub name: String,
    pub assigned_team_id: Option<Uuid>,
    pub is_global: bool,
}

pub struct CreateCompanyUseCase<C: CompanyRepository, T: TeamRepository, U: UserRepository> {
    pub companies: C,
    pub teams: T,
    pub users: U,
}

impl<C: CompanyRepository, T: TeamRepository, U: UserRepository> CreateCompanyUseCase<C, T, U> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        input: CreateCompanyInput,
    ) -> Result<Company, CrmServiceError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        if !actor.level.is_admin() {
            return Err(CrmServiceError::Forbidden);
        }
        if input.name.trim().is_empty() {
            return Err(CrmServiceError::Validation("name must not be empty".to_owned()));
        }
        if let Some(team_id) = input.assigned_team_id {
            if self.teams.find_by_id(team_id).await?.is_none() {
                return Err(CrmServiceError::Validation("assigned team does not exist".to_owned()));
            }
        }
        let now = Utc::now();
        let company = Company {
            id: Uuid::now_v7(),
            name: input.name,
            assigned_team_id: input.assigned_team_id,
            is_global: input.is_global,
            created_at: now,
            updated_at: now,
        };
        self.companies.create(&company).await?;
        Ok(company)
    }
}

// ── UpdateCompany ────────────────────────────────────────────────────────────

pub struct UpdateCompanyInput {
    pub name: Option<String>,
    pub assigned_team_id: Option<Option<Uuid>>,
    pub is_global: Option<bool>,
}

pub struct UpdateCompanyUseCase<C: CompanyRepository, T: TeamRepository, U: UserRepository> {
    pub companies: C,
    pub teams: T,
    pub users: U,
}

impl<C: CompanyRepository, T: TeamRepository, U: UserRepository> UpdateCompanyUseCase<C, T, U> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        company_id: Uuid,
        input: UpdateCompanyInput,
    ) -> Result<Company, CrmServiceError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        if !actor.level.is_admin() {
            return Err(CrmServiceError::Forbidden);
        }
        let mut company = self
            .companies
            .find_by_id(company_id)
            .await?
            .ok_or(CrmServiceError::CompanyNotFound)?;
        if let Some(name) = input.name {
            if name.trim().is_empty() {
                return Err(CrmServiceError::Validation("name must not be empty".to_owned()));
            }
            company.name = name;
        }
        if let Some(assigned) = input.assigned_team_id {
            if let Some(team_id) = assigned {
                if self.teams.find_by_id(team_id).await?.is_none() {
                    return Err(CrmServiceError::Validation(
                        "assigned team does not exist".to_owned(),
                    ));
                }
            }
            company.assigned_team_id = assigned;
        }
        if let Some(is_global) = input.is_global {
            company.is_global = is_global;
        }
        company.updated_at = Utc::now();
        self.companies.update(&company).await?;
        Ok(company)
    }
}
