//! Contractors

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod tracking;

pub use errors::ContractorsServiceError;
pub use service::*;
pub use tracking::{AGGREGATION_DEBOUNCE_SECONDS, ChangeOutcome, ContractorChange, needs_request};
