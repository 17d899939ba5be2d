//! # Rollcall Core
//!
//! Core types, errors, and utilities for the Rollcall API.
//!
//! This crate provides foundational types used throughout the Rollcall application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Pagination utilities for API responses
//! - [`serde`]: Custom serde helpers for lenient query-string parsing
//!
//! # Example
//!
//! ```ignore
//! use rollcall_core::errors::AppError;
//! use rollcall_core::pagination::{PaginationParams, PaginationMeta};
//!
//! // Create an error
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//!
//! // Use pagination
//! let params = PaginationParams::default();
//! let limit = params.limit();
//! ```

pub mod errors;
pub mod pagination;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
