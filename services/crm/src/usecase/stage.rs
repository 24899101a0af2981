use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{StageRepository, UserRepository};
use crate::domain::types::DealStage;
use crate::error::CrmServiceError;

/// Next append position: `max(order) + 1`, or `0` for an empty pipeline.
/// New stages always sort last without renumbering existing ones.
pub fn next_stage_order(existing: &[DealStage]) -> i32 {
    existing
        .iter()
        .map(|s| s.order_index)
        .max()
        .map_or(0, |max| max + 1)
}

// ── ListStages ───────────────────────────────────────────────────────────────

pub struct ListStagesUseCase<S: StageRepository> {
    pub stages: S,
}

impl<S: StageRepository> ListStagesUseCase<S> {
    /// Active stages in pipeline order.
    pub async fn execute(&self) -> Result<Vec<DealStage>, CrmServiceError> {
        self.stages.find_active().await
    }
}

// ── CreateStage ──────────────────────────────────────────────────────────────

pub struct CreateStageInput {
    pub name: String,
    pub color: String,
    pub is_default: bool,
}

pub struct CreateStageUseCase<S: StageRepository, U: UserRepository> {
    pub stages: S,
    pub users: U,
}

impl<S: StageRepository, U: UserRepository> CreateStageUseCase<S, U> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        input: CreateStageInput,
    ) -> Result<DealStage, CrmServiceError> {
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
        // Inactive stages still occupy their order slot, so the append
        // position is computed over all stages, not just active ones.
        let existing = self.stages.find_all().await?;
        let stage = DealStage {
            id: Uuid::now_v7(),
            name: input.name,
            order_index: next_stage_order(&existing),
            color: input.color,
            is_default: input.is_default,
            is_active: true,
            company_owner_id: Some(actor_id),
            created_at: Utc::now(),
        };
        self.stages.create(&stage).await?;
        Ok(stage)
    }
}
