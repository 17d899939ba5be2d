//! Report DTOs, re-exported from `rollcall-models`.

pub use rollcall_models::reports::*;
