//! Student data models and DTOs, re-exported from `rollcall-models`.

pub use rollcall_models::students::*;
