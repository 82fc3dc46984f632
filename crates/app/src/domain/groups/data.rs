//! Groups Data

use crate::domain::{
    groups::records::GroupUuid, owners::records::OwnerId, schedules::Schedule,
};

/// New Group Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewGroup {
    pub uuid: GroupUuid,
    pub owner_id: OwnerId,
    pub name: String,
    pub schedule: Schedule,
}

/// Group Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct GroupUpdate {
    pub name: String,
    pub schedule: Schedule,
}
