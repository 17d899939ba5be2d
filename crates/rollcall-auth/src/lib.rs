//! # Rollcall Auth
//!
//! Authentication types and JWT utilities for the Rollcall API.
//!
//! This crate provides:
//!
//! - [`claims`]: JWT claim structure for access tokens
//! - [`jwt`]: Token creation and verification utilities
//! - [`permissions`]: Permission names checked by the API
//!
//! Tokens are issued out of band (see the `rollcall-cli issue-token`
//! command); the API only verifies them. Every request is scoped to the
//! school carried in the token's `school_id` claim.
//!
//! # Example
//!
//! ```ignore
//! use rollcall_auth::{create_access_token, permissions, verify_token};
//! use rollcall_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//!
//! let token = create_access_token(
//!     user_id,
//!     "clerk@school.test",
//!     Some(school_id),
//!     vec![permissions::ATTENDANCE_MARK.to_string()],
//!     &config,
//! )?;
//!
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;
pub mod permissions;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
