use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbAccessRequestRepository, DbBrandingRepository, DbCompanyRepository, DbContactRepository,
    DbDealRepository, DbExchangeRateRepository, DbStageRepository, DbTeamRepository,
    DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository { db: self.db.clone() }
    }

    pub fn team_repo(&self) -> DbTeamRepository {
        DbTeamRepository { db: self.db.clone() }
    }

    pub fn company_repo(&self) -> DbCompanyRepository {
        DbCompanyRepository { db: self.db.clone() }
    }

    pub fn contact_repo(&self) -> DbContactRepository {
        DbContactRepository { db: self.db.clone() }
    }

    pub fn access_request_repo(&self) -> DbAccessRequestRepository {
        DbAccessRequestRepository { db: self.db.clone() }
    }

    pub fn deal_repo(&self) -> DbDealRepository {
        DbDealRepository { db: self.db.clone() }
    }

    pub fn stage_repo(&self) -> DbStageRepository {
        DbStageRepository { db: self.db.clone() }
    }

    pub fn exchange_rate_repo(&self) -> DbExchangeRateRepository {
        DbExchangeRateRepository { db: self.db.clone() }
    }

    pub fn branding_repo(&self) -> DbBrandingRepository {
        DbBrandingRepository { db: self.db.clone() }
    }
}
