//! Daily attendance module.
//!
//! Teachers mark a class for one date at a time. A save is accepted only
//! for past or present working days inside the academic session, and the
//! whole batch commits or rolls back together.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
