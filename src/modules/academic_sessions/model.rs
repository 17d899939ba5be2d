//! Academic session data models and DTOs.
//!
//! Re-exported from the `rollcall-models` crate, which the CLI shares.

pub use rollcall_models::academic_sessions::*;
