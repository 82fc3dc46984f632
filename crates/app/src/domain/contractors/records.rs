//! Contractor Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{groups::records::GroupUuid, schedules::RequestId},
    uuids::TypedUuid,
};

/// Contractor UUID
pub type ContractorUuid = TypedUuid<ContractorRecord>;

/// A period a contractor has been asked for, and when it was fulfilled.
///
/// Stored as `{"id": "21_22-2024", "timestamp": 0}` where a zero timestamp
/// means the timesheet has not arrived yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastRequest {
    pub id: RequestId,

    #[serde(rename = "timestamp", with = "epoch_seconds")]
    pub fulfilled_at: Option<Timestamp>,
}

impl LastRequest {
    #[must_use]
    pub fn pending(id: RequestId) -> Self {
        Self {
            id,
            fulfilled_at: None,
        }
    }

    #[must_use]
    pub fn is_fulfilled(&self) -> bool {
        self.fulfilled_at.is_some()
    }
}

/// Contractor Record
#[derive(Debug, Clone, PartialEq)]
pub struct ContractorRecord {
    pub uuid: ContractorUuid,
    pub group_uuid: GroupUuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub photo_url: String,
    pub last_requests: Vec<LastRequest>,
    pub last_aggregation_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ContractorRecord {
    /// Requests still waiting for a timesheet.
    pub fn outstanding_requests(&self) -> impl Iterator<Item = &LastRequest> {
        self.last_requests
            .iter()
            .filter(|request| !request.is_fulfilled())
    }
}

mod epoch_seconds {
    use jiff::Timestamp;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[expect(
        clippy::ref_option,
        reason = "serde's `with` attribute passes fields by reference"
    )]
    pub(super) fn serialize<S: Serializer>(
        value: &Option<Timestamp>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.map_or(0, Timestamp::as_second))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        match i64::deserialize(deserializer)? {
            0 => Ok(None),
            seconds => Timestamp::from_second(seconds).map(Some).map_err(D::Error::custom),
        }
    }
}
