//! Level-based visibility.
//!
//! The four hierarchy rules live in a fixed policy table keyed by level, one
//! pure function per level, so each rule is unit-testable on its own and no
//! call site re-branches on level.

use uuid::Uuid;

use cierre_domain::level::UserLevel;

use crate::domain::repository::UserRepository;
use crate::domain::types::{Company, User};
use crate::error::CrmServiceError;

type LevelPolicy = fn(&User, &[User]) -> Vec<User>;

fn admin_sees_everyone(_requester: &User, all: &[User]) -> Vec<User> {
    all.to_vec()
}

fn leader_sees_team(requester: &User, all: &[User]) -> Vec<User> {
    all.iter()
        .filter(|u| {
            u.id == requester.id
                || (requester.team_id.is_some() && u.team_id == requester.team_id)
        })
        .cloned()
        .collect()
}

fn manager_sees_direct_reports(requester: &User, all: &[User]) -> Vec<User> {
    all.iter()
        .filter(|u| u.id == requester.id || u.manager_id == Some(requester.id))
        .cloned()
        .collect()
}

fn contributor_sees_self(requester: &User, all: &[User]) -> Vec<User> {
    all.iter().filter(|u| u.id == requester.id).cloned().collect()
}

pub fn policy_for(level: UserLevel) -> LevelPolicy {
    match level {
        UserLevel::Admin => admin_sees_everyone,
        UserLevel::TeamLeader => leader_sees_team,
        UserLevel::Manager => manager_sees_direct_reports,
        UserLevel::Contributor => contributor_sees_self,
    }
}

/// Users the requester may see, per their level's policy.
pub fn visible_users(requester: &User, all: &[User]) -> Vec<User> {
    policy_for(requester.level)(requester, all)
}

/// Companies the requester may see: admins see all; otherwise global
/// companies plus those assigned to the requester's team.
pub fn visible_companies(requester: &User, companies: Vec<Company>) -> Vec<Company> {
    if requester.level.is_admin() {
        return companies;
    }
    companies
        .into_iter()
        .filter(|c| {
            c.is_global
                || (requester.team_id.is_some() && c.assigned_team_id == requester.team_id)
        })
        .collect()
}

// ── ResolveVisibleUsers ──────────────────────────────────────────────────────

pub struct ResolveVisibleUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ResolveVisibleUsersUseCase<R> {
    /// A missing requester row (deleted between session issuance and this
    /// lookup) fails with `UserNotFound` rather than defaulting to any level.
    pub async fn execute(&self, requester_id: Uuid) -> Result<Vec<User>, CrmServiceError> {
        let requester = self
            .repo
            .find_by_id(requester_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        let all = self.repo.find_all().await?;
        Ok(visible_users(&requester, &all))
    }
}
