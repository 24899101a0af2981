use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cierre_core::identity::IdentityHeaders;
use cierre_core::response::ApiResponse;

use crate::domain::types::Contact;
use crate::error::CrmServiceError;
use crate::state::AppState;
use crate::usecase::contact::{
    CreateContactInput, CreateContactUseCase, GetContactUseCase, ListContactsUseCase,
};

#[derive(Serialize)]
pub struct ContactResponse {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(serialize_with = "cierre_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "cierre_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            company_id: contact.company_id.to_string(),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

// ── GET /contacts ────────────────────────────────────────────────────────────

pub async fn get_contacts(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ContactResponse>>>, CrmServiceError> {
    let usecase = ListContactsUseCase {
        contacts: state.contact_repo(),
        companies: state.company_repo(),
        requests: state.access_request_repo(),
        users: state.user_repo(),
    };
    let contacts = usecase.execute(identity.user_id).await?;
    Ok(Json(ApiResponse::ok(
        contacts.into_iter().map(ContactResponse::from).collect(),
    )))
}

// ── GET /contacts/{id} ───────────────────────────────────────────────────────

pub async fn get_contact(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(contact_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ContactResponse>>, CrmServiceError> {
    let usecase = GetContactUseCase {
        contacts: state.contact_repo(),
        companies: state.company_repo(),
        requests: state.access_request_repo(),
        users: state.user_repo(),
    };
    let contact = usecase.execute(identity.user_id, contact_id).await?;
    Ok(Json(ApiResponse::ok(contact.into())))
}

// ── POST /contacts ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateContactRequest {
    pub company_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub async fn create_contact(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ContactResponse>>), CrmServiceError> {
    let usecase = CreateContactUseCase {
        contacts: state.contact_repo(),
        companies: state.company_repo(),
        users: state.user_repo(),
    };
    let contact = usecase
        .execute(
            identity.user_id,
            CreateContactInput {
                company_id: body.company_id,
                name: body.name,
                email: body.email,
                phone: body.phone,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(contact.into()))))
}
