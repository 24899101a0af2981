use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{TeamRepository, UserRepository};
use crate::domain::types::Team;
use crate::error::CrmServiceError;

async fn require_admin<U: UserRepository>(
    users: &U,
    actor_id: Uuid,
) -> Result<(), CrmServiceError> {
    let actor = users
        .find_by_id(actor_id)
        .await?
        .ok_or(CrmServiceError::UserNotFound)?;
    if !actor.level.is_admin() {
        return Err(CrmServiceError::Forbidden);
    }
    Ok(())
}

// ── ListTeams ────────────────────────────────────────────────────────────────

pub struct ListTeamsUseCase<T: TeamRepository, U: UserRepository> {
    pub teams: T,
    pub users: U,
}

impl<T: TeamRepository, U: UserRepository> ListTeamsUseCase<T, U> {
    pub async fn execute(&self, actor_id: Uuid) -> Result<Vec<Team>, CrmServiceError> {
        require_admin(&self.users, actor_id).await?;
        self.teams.find_all().await
    }
}

// ── CreateTeam ───────────────────────────────────────────────────────────────

pub struct CreateTeamInput {
    pub name: String,
    pub description: String,
    pub leader_id: Option<Uuid>,
}

pub struct CreateTeamUseCase<T: TeamRepository, U: UserRepository> {
    pub teams: T,
    pub users: U,
}

impl<T: TeamRepository, U: UserRepository> CreateTeamUseCase<T, U> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        input: CreateTeamInput,
    ) -> Result<Team, CrmServiceError> {
        require_admin(&self.users, actor_id).await?;
        if input.name.trim().is_empty() {
            return Err(CrmServiceError::Validation("name must not be empty".to_owned()));
        }
        if let Some(leader_id) = input.leader_id {
            if self.users.find_by_id(leader_id).await?.is_none() {
                return Err(CrmServiceError::Validation("leader does not exist".to_owned()));
            }
        }
        let now = Utc::now();
        let team = Team {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            leader_id: input.leader_id,
            created_at: now,
            updated_at: now,
        };
        self.teams.create(&team).await?;
        Ok(team)
    }
}

// ── UpdateTeam ───────────────────────────────────────────────────────────────

pub struct UpdateTeamInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub leader_id: Option<Option<Uuid>>,
}

pub struct UpdateTeamUseCase<T: TeamRepository, U: UserRepository> {
    pub teams: T,
    pub users: U,
}

impl<T: TeamRepository, U: UserRepository> UpdateTeamUseCase<T, U> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        team_id: Uuid,
        input: UpdateTeamInput,
    ) -> Result<Team, CrmServiceError> {
        require_admin(&self.users, actor_id).await?;
        let mut team = self
            .teams
            .find_by_id(team_id)
            .await?
            .ok_or(CrmServiceError::TeamNotFound)?;
        if let Some(name) = input.name {
            if name.trim().is_empty() {
                return Err(CrmServiceError::Validation("name must not be empty".to_owned()));
            }
            team.name = name;
        }
        if let Some(description) = input.description {
            team.description = description;
        }
        if let Some(leader_id) = input.leader_id {
            if let Some(id) = leader_id {
                if self.users.find_by_id(id).await?.is_none() {
                    return Err(CrmServiceError::Validation("leader does not exist".to_owned()));
                }
            }
            team.leader_id = leader_id;
        }
        team.updated_at = Utc::now();
        self.teams.update(&team).await?;
        Ok(team)
    }
}
