//! Utility modules for the Rollcall API.
//!
//! - [`auth_helpers`]: Tenant and academic-session resolution for handlers
//! - [`tracing`]: Span and audit-event helpers

pub mod auth_helpers;
pub mod tracing;
