//! Attendance reports.
//!
//! Reports load a session's holidays and attendance into an in-memory
//! ledger and compose monthly and yearly aggregates from it. Reads run
//! outside a transaction.

pub mod controller;
pub mod export;
pub mod model;
pub mod router;
pub mod service;
