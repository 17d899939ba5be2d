//! Configuration modules for the Rollcall API.
//!
//! Connection, CORS, JWT and rate-limit settings live in the
//! `rollcall-config` crate and are re-exported here. This module adds the
//! settings that only the HTTP service reads.
//!
//! # Modules
//!
//! - [`attendance`]: Attendance aggregation policy
//!
//! # Example
//!
//! ```ignore
//! use crate::config::{AttendanceConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let attendance_config = AttendanceConfig::from_env();
//! ```

pub mod attendance;

pub use attendance::AttendanceConfig;
pub use rollcall_config::{CorsConfig, JwtConfig, RateLimitConfig, ServerConfig};
