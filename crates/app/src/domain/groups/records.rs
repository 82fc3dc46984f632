//! Group Records

use jiff::Timestamp;

use crate::{
    domain::{owners::records::OwnerId, schedules::Schedule},
    uuids::TypedUuid,
};

/// Group UUID
pub type GroupUuid = TypedUuid<GroupRecord>;

/// Group Record
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRecord {
    pub uuid: GroupUuid,
    pub owner_id: OwnerId,
    pub name: String,
    pub schedule: Schedule,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
