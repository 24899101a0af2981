use chrono::Utc;
use uuid::Uuid;

use cierre_domain::level::UserLevel;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::CrmServiceError;

/// Hierarchy invariant: whoever reports to a manager must sit strictly below
/// them. Checked on create and on every reassignment; the schema does not
/// enforce it and the visibility resolver depends on it.
async fn check_manager_outranks<R: UserRepository>(
    repo: &R,
    level: UserLevel,
    manager_id: Uuid,
) -> Result<(), CrmServiceError> {
    let manager = repo
        .find_by_id(manager_id)
        .await?
        .ok_or_else(|| CrmServiceError::Validation("manager does not exist".to_owned()))?;
    if !manager.level.outranks(level) {
        return Err(CrmServiceError::Validation(
            "manager must have a higher level than their report".to_owned(),
        ));
    }
    Ok(())
}

// ── GetMe ────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetMeUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, CrmServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)
    }
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub role: String,
    pub level: UserLevel,
    pub manager_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        input: CreateUserInput,
    ) -> Result<User, CrmServiceError> {
        let actor = self
            .repo
            .find_by_id(actor_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        if !actor.level.is_admin() {
            return Err(CrmServiceError::Forbidden);
        }
        if let Some(manager_id) = input.manager_id {
            check_manager_outranks(&self.repo, input.level, manager_id).await?;
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            role: input.role,
            level: input.level,
            manager_id: input.manager_id,
            team_id: input.team_id,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await?;
        Ok(user)
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

/// Admin reassignment of a user's place in the hierarchy. Absent fields are
/// left untouched; `manager_id`/`team_id` accept an explicit null to clear.
pub struct UpdateUserInput {
    pub role: Option<String>,
    pub level: Option<UserLevel>,
    pub manager_id: Option<Option<Uuid>>,
    pub team_id: Option<Option<Uuid>>,
}

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        input: UpdateUserInput,
    ) -> Result<User, CrmServiceError> {
        let actor = self
            .repo
            .find_by_id(actor_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        if !actor.level.is_admin() {
            return Err(CrmServiceError::Forbidden);
        }
        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;

        if let Some(role) = input.role {
            user.role = role;
        }
        if let Some(level) = input.level {
            user.level = level;
        }
        if let Some(manager_id) = input.manager_id {
            user.manager_id = manager_id;
        }
        if let Some(team_id) = input.team_id {
            user.team_id = team_id;
        }
        if user.manager_id == Some(user.id) {
            return Err(CrmServiceError::Validation(
                "a user cannot be their own manager".to_owned(),
            ));
        }
        if let Some(manager_id) = user.manager_id {
            check_manager_outranks(&self.repo, user.level, manager_id).await?;
        }
        user.updated_at = Utc::now();
        self.repo.update(&user).await?;
        Ok(user)
    }
}
