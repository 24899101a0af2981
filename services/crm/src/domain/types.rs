use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use cierre_domain::currency::Currency;
use cierre_domain::level::UserLevel;

/// CRM user with their place in the hierarchy.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub level: UserLevel,
    pub manager_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sales team.
#[derive(Debug, Clone)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub leader_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer company — global or scoped to one team.
#[derive(Debug, Clone)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub assigned_team_id: Option<Uuid>,
    pub is_global: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Person at a company.
#[derive(Debug, Clone)]
pub struct Contact {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Deal owned by a user. Carries the amount in both currencies; `currency`
/// records which one was entered.
#[derive(Debug, Clone)]
pub struct Deal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub contact_id: Option<Uuid>,
    pub stage_id: Uuid,
    pub title: String,
    pub currency: Currency,
    pub amount_usd: Decimal,
    pub amount_ars: Decimal,
    pub probability: i16,
    pub expected_close_date: Option<NaiveDate>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    /// The amount in the currency the deal was entered in.
    pub fn native_amount(&self) -> Decimal {
        match self.currency {
            Currency::Usd => self.amount_usd,
            Currency::Ars => self.amount_ars,
        }
    }
}

/// Pipeline stage.
#[derive(Debug, Clone)]
pub struct DealStage {
    pub id: Uuid,
    pub name: String,
    pub order_index: i32,
    pub color: String,
    pub is_default: bool,
    pub is_active: bool,
    pub company_owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Access-request lifecycle. `pending -> approved | rejected`; terminal
/// states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parse a stored status. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// True once the request can no longer transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// Explicit ask for visibility of one contact outside default rules.
#[derive(Debug, Clone)]
pub struct ContactAccessRequest {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub contact_id: Uuid,
    pub status: RequestStatus,
    pub reason: String,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Persisted USD→ARS rate; newest by `created_at` wins.
#[derive(Debug, Clone)]
pub struct ExchangeRate {
    pub id: Uuid,
    pub date: NaiveDate,
    pub usd_to_ars: Decimal,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

/// Org branding, fetched per request.
#[derive(Debug, Clone)]
pub struct Branding {
    pub id: Uuid,
    pub org_name: String,
    pub primary_color: String,
    pub accent_color: String,
    pub logo_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Branding {
    /// Defaults served before an admin ever saves branding.
    pub fn unset() -> Self {
        Self {
            id: Uuid::nil(),
            org_name: "Cierre".to_owned(),
            primary_color: "#1f2937".to_owned(),
            accent_color: "#2563eb".to_owned(),
            logo_url: None,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}
