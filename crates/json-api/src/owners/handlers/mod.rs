//! Owner Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jobsender_app::domain::owners::{data::OwnerUpdate, records::OwnerRecord};

/// Editable owner profile fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct OwnerProfileRequest {
    pub name: String,
    pub surname: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub photo_url: String,
}

impl From<OwnerProfileRequest> for OwnerUpdate {
    fn from(request: OwnerProfileRequest) -> Self {
        OwnerUpdate {
            name: request.name,
            surname: request.surname,
            phone: request.phone,
            photo_url: request.photo_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OwnerResponse {
    /// Identity provider user id
    pub id: String,

    /// The group this owner manages, if one was created
    pub group_uuid: Option<Uuid>,

    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub photo_url: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OwnerRecord> for OwnerResponse {
    fn from(owner: OwnerRecord) -> Self {
        OwnerResponse {
            id: owner.id.to_string(),
            group_uuid: owner.group_uuid.map(Into::into),
            name: owner.name,
            surname: owner.surname,
            email: owner.email,
            phone: owner.phone,
            photo_url: owner.photo_url,
            created_at: owner.created_at.to_string(),
            updated_at: owner.updated_at.to_string(),
        }
    }
}
