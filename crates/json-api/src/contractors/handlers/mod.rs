//! Contractor Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

use std::string::ToString;

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jobsender_app::domain::contractors::{
    data::ContractorUpdate,
    records::{ContractorRecord, LastRequest},
};

/// Contractor profile fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContractorRequest {
    pub name: String,
    pub surname: String,

    /// Address timesheet requests are sent to
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub photo_url: String,
}

impl ContractorRequest {
    /// Reject emails that are not a single plain `local@domain` address.
    pub(crate) fn validated(self) -> Result<Self, StatusError> {
        if is_plain_address(&self.email) {
            Ok(self)
        } else {
            Err(StatusError::bad_request().brief("Invalid contractor email"))
        }
    }
}

fn is_plain_address(email: &str) -> bool {
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }

    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

impl From<ContractorRequest> for ContractorUpdate {
    fn from(request: ContractorRequest) -> Self {
        ContractorUpdate {
            name: request.name,
            surname: request.surname,
            email: request.email,
            phone: request.phone,
            photo_url: request.photo_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LastRequestResponse {
    /// Request period token, e.g. `21_22-2024`
    pub id: String,

    /// When the timesheet arrived, if it has
    pub fulfilled_at: Option<String>,
}

impl From<LastRequest> for LastRequestResponse {
    fn from(request: LastRequest) -> Self {
        LastRequestResponse {
            id: request.id.to_string(),
            fulfilled_at: request.fulfilled_at.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContractorResponse {
    pub uuid: Uuid,
    pub group_uuid: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub photo_url: String,

    /// Periods this contractor has been asked for
    pub last_requests: Vec<LastRequestResponse>,

    pub last_aggregation_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ContractorRecord> for ContractorResponse {
    fn from(contractor: ContractorRecord) -> Self {
        ContractorResponse {
            uuid: contractor.uuid.into(),
            group_uuid: contractor.group_uuid.into(),
            name: contractor.name,
            surname: contractor.surname,
            email: contractor.email,
            phone: contractor.phone,
            photo_url: contractor.photo_url,
            last_requests: contractor
                .last_requests
                .into_iter()
                .map(Into::into)
                .collect(),
            last_aggregation_at: contractor.last_aggregation_at.as_ref().map(ToString::to_string),
            created_at: contractor.created_at.to_string(),
            updated_at: contractor.updated_at.to_string(),
        }
    }
}
