//! Students module.
//!
//! Student records scoped to a school, grouped by class and section.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
