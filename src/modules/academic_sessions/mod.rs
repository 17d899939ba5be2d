//! Academic sessions module.
//!
//! An academic session is a school's academic year. Holidays and attendance
//! records belong to a session, and reports use its date range to clip
//! months. At most one session per school is active.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
