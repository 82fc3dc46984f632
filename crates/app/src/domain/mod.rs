//! Job Sender Domain Concerns

pub mod contractors;
pub mod groups;
pub mod owners;
pub mod schedules;
pub mod timesheets;
