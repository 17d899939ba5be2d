use std::fmt;
use std::sync::Arc;

use governor::{DefaultKeyedRateLimiter, RateLimiter};
use sqlx::PgPool;

use crate::config::{AttendanceConfig, CorsConfig, JwtConfig, RateLimitConfig};
use rollcall_db::init_db_pool;

/// Per-client token buckets keyed by IP address.
pub type ClientRateLimiter = DefaultKeyedRateLimiter<String>;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub attendance_config: AttendanceConfig,
    pub rate_limiter: Arc<ClientRateLimiter>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .field("cors_config", &self.cors_config)
            .field("rate_limit_config", &self.rate_limit_config)
            .field("attendance_config", &self.attendance_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Assembles state around an existing pool.
    pub fn new(
        db: PgPool,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        rate_limit_config: RateLimitConfig,
        attendance_config: AttendanceConfig,
    ) -> Self {
        let rate_limiter = Arc::new(RateLimiter::keyed(rate_limit_config.quota()));
        Self {
            db,
            jwt_config,
            cors_config,
            rate_limit_config,
            attendance_config,
            rate_limiter,
        }
    }
}

pub async fn init_app_state() -> AppState {
    AppState::new(
        init_db_pool().await,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
        RateLimitConfig::from_env(),
        AttendanceConfig::from_env(),
    )
}
