//! Shared application domain, persistence and cloud collaborator modules.

pub mod cloud;
pub mod context;
pub mod cycle;
pub mod database;
pub mod domain;
pub mod reporting;
pub mod uuids;

#[cfg(test)]
mod test;
