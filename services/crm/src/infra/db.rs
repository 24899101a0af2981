use std::str::FromStr as _;

use anyhow::Context as _;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, sea_query::Expr,
};
use uuid::Uuid;

use cierre_crm_schema::{
    branding_settings, companies, contact_access_requests, contacts, deal_stages, deals,
    exchange_rates, teams, users,
};
use cierre_domain::currency::Currency;
use cierre_domain::level::UserLevel;

use crate::domain::repository::{
    AccessRequestRepository, BrandingRepository, CompanyRepository, ContactRepository,
    DealRepository, ExchangeRateRepository, StageRepository, TeamRepository, UserRepository,
};
use crate::domain::types::{
    Branding, Company, Contact, ContactAccessRequest, Deal, DealStage, ExchangeRate, RequestStatus,
    Team, User,
};
use crate::error::CrmServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CrmServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_all(&self) -> Result<Vec<User>, CrmServiceError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn create(&self, user: &User) -> Result<(), CrmServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            role: Set(user.role.clone()),
            level: Set(user.level.as_u8() as i16),
            manager_id: Set(user.manager_id),
            team_id: Set(user.team_id),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), CrmServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            role: Set(user.role.clone()),
            level: Set(user.level.as_u8() as i16),
            manager_id: Set(user.manager_id),
            team_id: Set(user.team_id),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .update(&self.db)
        .await
        .context("update user")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        role: model.role,
        // Unknown stored levels collapse to the least-authority rung rather
        // than failing reads or widening visibility.
        level: u8::try_from(model.level)
            .ok()
            .and_then(UserLevel::from_u8)
            .unwrap_or(UserLevel::Contributor),
        manager_id: model.manager_id,
        team_id: model.team_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Team repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTeamRepository {
    pub db: DatabaseConnection,
}

impl TeamRepository for DbTeamRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, CrmServiceError> {
        let model = teams::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find team by id")?;
        Ok(model.map(team_from_model))
    }

    async fn find_all(&self) -> Result<Vec<Team>, CrmServiceError> {
        let models = teams::Entity::find()
            .order_by_asc(teams::Column::Name)
            .all(&self.db)
            .await
            .context("list teams")?;
        Ok(models.into_iter().map(team_from_model).collect())
    }

    async fn create(&self, team: &Team) -> Result<(), CrmServiceError> {
        teams::ActiveModel {
            id: Set(team.id),
            name: Set(team.name.clone()),
            description: Set(team.description.clone()),
            leader_id: Set(team.leader_id),
            created_at: Set(team.created_at),
            updated_at: Set(team.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create team")?;
        Ok(())
    }

    async fn update(&self, team: &Team) -> Result<(), CrmServiceError> {
        teams::ActiveModel {
            id: Set(team.id),
            name: Set(team.name.clone()),
            description: Set(team.description.clone()),
            leader_id: Set(team.leader_id),
            created_at: Set(team.created_at),
            updated_at: Set(team.updated_at),
        }
        .update(&self.db)
        .await
        .context("update team")?;
        Ok(())
    }
}

fn team_from_model(model: teams::Model) -> Team {
    Team {
        id: model.id,
        name: model.name,
        description: model.description,
        leader_id: model.leader_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Company repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCompanyRepository {
    pub db: DatabaseConnection,
}

impl CompanyRepository for DbCompanyRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, CrmServiceError> {
        let model = companies::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find company by id")?;
        Ok(model.map(company_from_model))
    }

    async fn find_all(&self) -> Result<Vec<Company>, CrmServiceError> {
        let models = companies::Entity::find()
            .order_by_asc(companies::Column::Name)
            .all(&self.db)
            .await
            .context("list companies")?;
        Ok(models.into_iter().map(company_from_model).collect())
    }

    async fn create(&self, company: &Company) -> Result<(), CrmServiceError> {
        companies::ActiveModel {
            id: Set(company.id),
            name: Set(company.name.clone()),
            assigned_team_id: Set(company.assigned_team_id),
            is_global: Set(company.is_global),
            created_at: Set(company.created_at),
            updated_at: Set(company.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create company")?;
        Ok(())
    }

    async fn update(&self, company: &Company) -> Result<(), CrmServiceError> {
        companies::ActiveModel {
            id: Set(company.id),
            name: Set(company.name.clone()),
            assigned_team_id: Set(company.assigned_team_id),
            is_global: Set(company.is_global),
            created_at: Set(company.created_at),
            updated_at: Set(company.updated_at),
        }
        .update(&self.db)
        .await
        .context("update company")?;
        Ok(())
    }
}

fn company_from_model(model: companies::Model) -> Company {
    Company {
        id: model.id,
        name: model.name,
        assigned_team_id: model.assigned_team_id,
        is_global: model.is_global,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Contact repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbContactRepository {
    pub db: DatabaseConnection,
}

impl ContactRepository for DbContactRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, CrmServiceError> {
        let model = contacts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find contact by id")?;
        Ok(model.map(contact_from_model))
    }

    async fn find_all(&self) -> Result<Vec<Contact>, CrmServiceError> {
        let models = contacts::Entity::find()
            .order_by_asc(contacts::Column::Name)
            .all(&self.db)
            .await
            .context("list contacts")?;
        Ok(models.into_iter().map(contact_from_model).collect())
    }

    async fn create(&self, contact: &Contact) -> Result<(), CrmServiceError> {
        contacts::ActiveModel {
            id: Set(contact.id),
            company_id: Set(contact.company_id),
            name: Set(contact.name.clone()),
            email: Set(contact.email.clone()),
            phone: Set(contact.phone.clone()),
            created_at: Set(contact.created_at),
            updated_at: Set(contact.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create contact")?;
        Ok(())
    }
}

fn contact_from_model(model: contacts::Model) -> Contact {
    Contact {
        id: model.id,
        company_id: model.company_id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Access request repository ────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccessRequestRepository {
    pub db: DatabaseConnection,
}

impl AccessRequestRepository for DbAccessRequestRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContactAccessRequest>, CrmServiceError> {
        let model = contact_access_requests::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find access request by id")?;
        model.map(access_request_from_model).transpose()
    }

    async fn find_all(&self) -> Result<Vec<ContactAccessRequest>, CrmServiceError> {
        let models = contact_access_requests::Entity::find()
            .order_by_desc(contact_access_requests::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list access requests")?;
        let mut requests = models
            .into_iter()
            .map(access_request_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        // Review queue ordering: pending first, newest first within a status.
        requests.sort_by_key(|r| r.status != RequestStatus::Pending);
        Ok(requests)
    }

    async fn find_by_requester(
        &self,
        requester_id: Uuid,
    ) -> Result<Vec<ContactAccessRequest>, CrmServiceError> {
        let models = contact_access_requests::Entity::find()
            .filter(contact_access_requests::Column::RequesterId.eq(requester_id))
            .order_by_desc(contact_access_requests::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list access requests by requester")?;
        models
            .into_iter()
            .map(access_request_from_model)
            .collect()
    }

    async fn find_approved_contact_ids(
        &self,
        requester_id: Uuid,
    ) -> Result<Vec<Uuid>, CrmServiceError> {
        let models = contact_access_requests::Entity::find()
            .filter(contact_access_requests::Column::RequesterId.eq(requester_id))
            .filter(
                contact_access_requests::Column::Status.eq(RequestStatus::Approved.as_str()),
            )
            .all(&self.db)
            .await
            .context("list approved access requests")?;
        Ok(models.into_iter().map(|m| m.contact_id).collect())
    }

    async fn create(&self, request: &ContactAccessRequest) -> Result<(), CrmServiceError> {
        contact_access_requests::ActiveModel {
            id: Set(request.id),
            requester_id: Set(request.requester_id),
            contact_id: Set(request.contact_id),
            status: Set(request.status.as_str().to_owned()),
            reason: Set(request.reason.clone()),
            reviewed_by: Set(request.reviewed_by),
            reviewed_at: Set(request.reviewed_at),
            created_at: Set(request.created_at),
        }
        .insert(&self.db)
        .await
        .context("create access request")?;
        Ok(())
    }

    async fn mark_reviewed(
        &self,
        id: Uuid,
        status: RequestStatus,
        reviewer_id: Uuid,
    ) -> Result<bool, CrmServiceError> {
        // Guarded transition: only a row still in `pending` is updated, so
        // concurrent reviews cannot both win.
        let result = contact_access_requests::Entity::update_many()
            .col_expr(
                contact_access_requests::Column::Status,
                Expr::value(status.as_str()),
            )
            .col_expr(
                contact_access_requests::Column::ReviewedBy,
                Expr::value(reviewer_id),
            )
            .col_expr(
                contact_access_requests::Column::ReviewedAt,
                Expr::value(Utc::now()),
            )
            .filter(contact_access_requests::Column::Id.eq(id))
            .filter(
                contact_access_requests::Column::Status.eq(RequestStatus::Pending.as_str()),
            )
            .exec(&self.db)
            .await
            .context("mark access request reviewed")?;
        Ok(result.rows_affected > 0)
    }
}

fn access_request_from_model(
    model: contact_access_requests::Model,
) -> Result<ContactAccessRequest, CrmServiceError> {
    let status = RequestStatus::parse(&model.status)
        .with_context(|| format!("unknown access request status {:?}", model.status))?;
    Ok(ContactAccessRequest {
        id: model.id,
        requester_id: model.requester_id,
        contact_id: model.contact_id,
        status,
        reason: model.reason,
        reviewed_by: model.reviewed_by,
        reviewed_at: model.reviewed_at,
        created_at: model.created_at,
    })
}

// ── Deal repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDealRepository {
    pub db: DatabaseConnection,
}

impl DealRepository for DbDealRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Deal>, CrmServiceError> {
        let model = deals::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find deal by id")?;
        model.map(deal_from_model).transpose()
    }

    async fn find_by_owners(&self, owner_ids: &[Uuid]) -> Result<Vec<Deal>, CrmServiceError> {
        if owner_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = deals::Entity::find()
            .filter(deals::Column::UserId.is_in(owner_ids.to_vec()))
            .order_by_desc(deals::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list deals by owners")?;
        models.into_iter().map(deal_from_model).collect()
    }

    async fn create(&self, deal: &Deal) -> Result<(), CrmServiceError> {
        deals::ActiveModel {
            id: Set(deal.id),
            user_id: Set(deal.user_id),
            company_id: Set(deal.company_id),
            contact_id: Set(deal.contact_id),
            stage_id: Set(deal.stage_id),
            title: Set(deal.title.clone()),
            currency: Set(deal.currency.to_string()),
            amount_usd: Set(deal.amount_usd),
            amount_ars: Set(deal.amount_ars),
            probability: Set(deal.probability),
            expected_close_date: Set(deal.expected_close_date),
            closed_at: Set(deal.closed_at),
            created_at: Set(deal.created_at),
            updated_at: Set(deal.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create deal")?;
        Ok(())
    }
}

fn deal_from_model(model: deals::Model) -> Result<Deal, CrmServiceError> {
    let currency = Currency::from_str(&model.currency)
        .with_context(|| format!("unknown deal currency {:?}", model.currency))?;
    Ok(Deal {
        id: model.id,
        user_id: model.user_id,
        company_id: model.company_id,
        contact_id: model.contact_id,
        stage_id: model.stage_id,
        title: model.title,
        currency,
        amount_usd: model.amount_usd,
        amount_ars: model.amount_ars,
        probability: model.probability,
        expected_close_date: model.expected_close_date,
        closed_at: model.closed_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Stage repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStageRepository {
    pub db: DatabaseConnection,
}

impl StageRepository for DbStageRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<DealStage>, CrmServiceError> {
        let model = deal_stages::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find stage by id")?;
        Ok(model.map(stage_from_model))
    }

    async fn find_active(&self) -> Result<Vec<DealStage>, CrmServiceError> {
        let models = deal_stages::Entity::find()
            .filter(deal_stages::Column::IsActive.eq(true))
            .order_by_asc(deal_stages::Column::OrderIndex)
            .all(&self.db)
            .await
            .context("list active stages")?;
        Ok(models.into_iter().map(stage_from_model).collect())
    }

    async fn find_all(&self) -> Result<Vec<DealStage>, CrmServiceError> {
        let models = deal_stages::Entity::find()
            .order_by_asc(deal_stages::Column::OrderIndex)
            .all(&self.db)
            .await
            .context("list stages")?;
        Ok(models.into_iter().map(stage_from_model).collect())
    }

    async fn create(&self, stage: &DealStage) -> Result<(), CrmServiceError> {
        deal_stages::ActiveModel {
            id: Set(stage.id),
            name: Set(stage.name.clone()),
            order_index: Set(stage.order_index),
            color: Set(stage.color.clone()),
            is_default: Set(stage.is_default),
            is_active: Set(stage.is_active),
            company_owner_id: Set(stage.company_owner_id),
            created_at: Set(stage.created_at),
        }
        .insert(&self.db)
        .await
        .context("create stage")?;
        Ok(())
    }
}

fn stage_from_model(model: deal_stages::Model) -> DealStage {
    DealStage {
        id: model.id,
        name: model.name,
        order_index: model.order_index,
        color: model.color,
        is_default: model.is_default,
        is_active: model.is_active,
        company_owner_id: model.company_owner_id,
        created_at: model.created_at,
    }
}

// ── Exchange rate repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbExchangeRateRepository {
    pub db: DatabaseConnection,
}

impl ExchangeRateRepository for DbExchangeRateRepository {
    async fn latest(&self) -> Result<Option<ExchangeRate>, CrmServiceError> {
        let model = exchange_rates::Entity::find()
            .order_by_desc(exchange_rates::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find latest exchange rate")?;
        Ok(model.map(rate_from_model))
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<ExchangeRate>, CrmServiceError> {
        let model = exchange_rates::Entity::find()
            .filter(exchange_rates::Column::Date.eq(date))
            .one(&self.db)
            .await
            .context("find exchange rate by date")?;
        Ok(model.map(rate_from_model))
    }

    async fn create(&self, rate: &ExchangeRate) -> Result<(), CrmServiceError> {
        exchange_rates::ActiveModel {
            id: Set(rate.id),
            date: Set(rate.date),
            usd_to_ars: Set(rate.usd_to_ars),
            source: Set(rate.source.clone()),
            created_at: Set(rate.created_at),
        }
        .insert(&self.db)
        .await
        .context("create exchange rate")?;
        Ok(())
    }

    async fn update(&self, rate: &ExchangeRate) -> Result<(), CrmServiceError> {
        exchange_rates::ActiveModel {
            id: Set(rate.id),
            date: Set(rate.date),
            usd_to_ars: Set(rate.usd_to_ars),
            source: Set(rate.source.clone()),
            created_at: Set(rate.created_at),
        }
        .update(&self.db)
        .await
        .context("update exchange rate")?;
        Ok(())
    }
}

fn rate_from_model(model: exchange_rates::Model) -> ExchangeRate {
    ExchangeRate {
        id: model.id,
        date: model.date,
        usd_to_ars: model.usd_to_ars,
        source: model.source,
        created_at: model.created_at,
    }
}

// ── Branding repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBrandingRepository {
    pub db: DatabaseConnection,
}

impl BrandingRepository for DbBrandingRepository {
    async fn get(&self) -> Result<Option<Branding>, CrmServiceError> {
        let model = branding_settings::Entity::find()
            .order_by_desc(branding_settings::Column::UpdatedAt)
            .one(&self.db)
            .await
            .context("find branding settings")?;
        Ok(model.map(branding_from_model))
    }

    async fn upsert(&self, branding: &Branding) -> Result<(), CrmServiceError> {
        let active = branding_settings::ActiveModel {
            id: Set(branding.id),
            org_name: Set(branding.org_name.clone()),
            primary_color: Set(branding.primary_color.clone()),
            accent_color: Set(branding.accent_color.clone()),
            logo_url: Set(branding.logo_url.clone()),
            updated_at: Set(branding.updated_at),
        };
        let exists = branding_settings::Entity::find_by_id(branding.id)
            .one(&self.db)
            .await
            .context("find branding row")?
            .is_some();
        if exists {
            active.update(&self.db).await.context("update branding")?;
        } else {
            active.insert(&self.db).await.context("insert branding")?;
        }
        Ok(())
    }
}

fn branding_from_model(model: branding_settings::Model) -> Branding {
    Branding {
        id: model.id,
        org_name: model.org_name,
        primary_color: model.primary_color,
        accent_color: model.accent_color,
        logo_url: model.logo_url,
        updated_at: model.updated_at,
    }
}
