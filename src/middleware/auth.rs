use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use rollcall_auth::{Claims, permissions, verify_token};
use rollcall_core::AppError;
use rollcall_models::ids::{SchoolId, UserId};

use crate::state::AppState;

/// Extractor that validates the bearer JWT and exposes its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.0.has_permission(permission)
    }

    /// The school this token is scoped to.
    ///
    /// Every attendance route is tenant-scoped, so a token without a school
    /// is rejected with 403.
    pub fn school_id(&self) -> Result<SchoolId, AppError> {
        self.0
            .school_id
            .map(SchoolId::from)
            .ok_or_else(|| AppError::forbidden("Token is not scoped to a school"))
    }

    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0
            .sub
            .parse::<UserId>()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Generates an extractor that authenticates and then requires one permission.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = rollcall_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                if !auth_user.has_permission($permission) {
                    return Err(rollcall_core::AppError::forbidden(format!(
                        "Access denied. Missing required permission: {}",
                        $permission
                    )));
                }

                Ok($name(auth_user))
            }
        }
    };
}

// Academic sessions
require_permission!(RequireSessionsManage, permissions::SESSIONS_MANAGE);
require_permission!(RequireSessionsRead, permissions::SESSIONS_READ);

// Students
require_permission!(RequireStudentsManage, permissions::STUDENTS_MANAGE);
require_permission!(RequireStudentsRead, permissions::STUDENTS_READ);

// Holidays
require_permission!(RequireHolidaysManage, permissions::HOLIDAYS_MANAGE);
require_permission!(RequireHolidaysRead, permissions::HOLIDAYS_READ);

// Attendance
require_permission!(RequireAttendanceMark, permissions::ATTENDANCE_MARK);
require_permission!(RequireAttendanceRead, permissions::ATTENDANCE_READ);

// Reports
require_permission!(RequireReportsRead, permissions::REPORTS_READ);

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claims(school_id: Option<Uuid>, permissions: Vec<&str>) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            email: "clerk@example.com".to_string(),
            school_id,
            permissions: permissions.into_iter().map(String::from).collect(),
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_has_permission() {
        let auth_user = AuthUser(claims(None, vec!["attendance:mark"]));
        assert!(auth_user.has_permission("attendance:mark"));
        assert!(!auth_user.has_permission("reports:read"));
    }

    #[test]
    fn test_school_id_required() {
        let school_id = Uuid::new_v4();
        let scoped = AuthUser(claims(Some(school_id), vec![]));
        assert_eq!(scoped.school_id().unwrap().into_inner(), school_id);

        let unscoped = AuthUser(claims(None, vec![]));
        let err = unscoped.school_id().unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_user_id_parses_subject() {
        let mut c = claims(None, vec![]);
        let user_id = Uuid::new_v4();
        c.sub = user_id.to_string();
        assert_eq!(AuthUser(c).user_id().unwrap().into_inner(), user_id);

        let mut bad = claims(None, vec![]);
        bad.sub = "not-a-uuid".to_string();
        assert!(AuthUser(bad).user_id().is_err());
    }
}
