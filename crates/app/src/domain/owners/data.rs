//! Owners Data

use crate::domain::owners::records::OwnerId;

/// New Owner Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOwner {
    pub id: OwnerId,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub photo_url: String,
}

/// Owner Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerUpdate {
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub photo_url: String,
}
