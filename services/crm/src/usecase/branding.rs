use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{BrandingRepository, UserRepository};
use crate::domain::types::Branding;
use crate::error::CrmServiceError;

// ── GetBranding ──────────────────────────────────────────────────────────────

pub struct GetBrandingUseCase<B: BrandingRepository> {
    pub branding: B,
}

impl<B: BrandingRepository> GetBrandingUseCase<B> {
    /// Returns stored branding, or the built-in defaults before any admin
    /// has saved one. Fetched per request, never held as process state.
    pub async fn execute(&self) -> Result<Branding, CrmServiceError> {
        Ok(self.branding.get().await?.unwrap_or_else(Branding::unset))
    }
}

// ── UpdateBranding ───────────────────────────────────────────────────────────

pub struct UpdateBrandingInput {
    pub org_name: String,
    pub primary_color: String,
    pub accent_color: String,
    pub logo_url: Option<String>,
}

pub struct UpdateBrandingUseCase<B: BrandingRepository, U: UserRepository> {
    pub branding: B,
    pub users: U,
}

impl<B: BrandingRepository, U: UserRepository> UpdateBrandingUseCase<B, U> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        input: UpdateBrandingInput,
    ) -> Result<Branding, CrmServiceError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(CrmServiceError::UserNotFound)?;
        if !actor.level.is_admin() {
            return Err(CrmServiceError::Forbidden);
        }
        if input.org_name.trim().is_empty() {
            return Err(CrmServiceError::Validation("org_name must not be empty".to_owned()));
        }
        let id = match self.branding.get().await? {
            Some(existing) => existing.id,
            None => Uuid::now_v7(),
        };
        let branding = Branding {
            id,
            org_name: input.org_name,
            primary_color: input.primary_color,
            accent_color: input.accent_color,
            logo_url: input.logo_url,
            updated_at: Utc::now(),
        };
        self.branding.upsert(&branding).await?;
        Ok(branding)
    }
}
