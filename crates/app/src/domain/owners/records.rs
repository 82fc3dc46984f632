//! Owner Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::domain::groups::records::GroupUuid;

/// Owner identifier, issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OwnerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Owner Record
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerRecord {
    pub id: OwnerId,
    pub group_uuid: Option<GroupUuid>,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub photo_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
