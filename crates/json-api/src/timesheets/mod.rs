//! Timesheets
//!
//! Owner-facing listings plus the two trigger endpoints called by the
//! scheduler job and the task queue.

mod errors;
mod handlers;

pub(crate) use handlers::*;
