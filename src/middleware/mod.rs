//! Middleware and extractors for cross-cutting request concerns.
//!
//! # Modules
//!
//! - [`auth`]: Bearer-token authentication and permission extractors
//! - [`rate_limit`]: Per-client request throttling
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` extractor validates the JWT and extracts claims
//! 3. Permission extractors check if the token grants the required permission
//! 4. Handlers resolve the tenant from the token's `school_id`
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::RequireAttendanceMark;
//!
//! async fn save_attendance(
//!     RequireAttendanceMark(auth_user): RequireAttendanceMark,
//! ) -> impl IntoResponse {
//!     // Only executes if the token carries "attendance:mark"
//! }
//! ```

pub mod auth;
pub mod rate_limit;
