//! Contractors Data

use crate::domain::{contractors::records::ContractorUuid, groups::records::GroupUuid};

/// New Contractor Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewContractor {
    pub uuid: ContractorUuid,
    pub group_uuid: GroupUuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub photo_url: String,
}

/// Contractor Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ContractorUpdate {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub photo_url: String,
}
