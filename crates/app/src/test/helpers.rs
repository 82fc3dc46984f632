//! Test Helpers

use jiff::Timestamp;

use crate::domain::{
    contractors::{
        data::NewContractor,
        records::{ContractorRecord, ContractorUuid},
    },
    groups::records::{GroupRecord, GroupUuid},
    owners::{data::NewOwner, records::OwnerId},
    schedules::Schedule,
};

pub(crate) fn new_owner(id: &str) -> NewOwner {
    NewOwner {
        id: OwnerId::new(id),
        name: "Olive".to_string(),
        surname: "Owner".to_string(),
        email: format!("{id}@example.com"),
        phone: "+44 20 7946 0000".to_string(),
        photo_url: String::new(),
    }
}

pub(crate) fn new_contractor(group: GroupUuid, email: &str) -> NewContractor {
    NewContractor {
        uuid: ContractorUuid::new(),
        group_uuid: group,
        name: "Jane".to_string(),
        surname: "Doe".to_string(),
        email: email.to_string(),
        phone: "+44 20 7946 0001".to_string(),
        photo_url: String::new(),
    }
}

/// An unsaved contractor with no request history.
pub(crate) fn contractor_record() -> ContractorRecord {
    ContractorRecord {
        uuid: ContractorUuid::new(),
        group_uuid: GroupUuid::new(),
        name: "Jane".to_string(),
        surname: "Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: String::new(),
        photo_url: String::new(),
        last_requests: Vec::new(),
        last_aggregation_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn group_record(schedule: Schedule) -> GroupRecord {
    GroupRecord {
        uuid: GroupUuid::new(),
        owner_id: OwnerId::new("owner-1"),
        name: "Test Group".to_string(),
        schedule,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
