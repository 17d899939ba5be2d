//! Holiday calendar module.
//!
//! Holidays are declared per academic session. Active holidays are excluded
//! from working days and block attendance entry for their date.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
