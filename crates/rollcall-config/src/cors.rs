//! Cross-origin configuration for the attendance front end.
//!
//! # Configuration
//!
//! - `ALLOWED_ORIGINS`: Comma-separated list of origins allowed to call the
//!   API (default: the local register UI and the dev server, see
//!   [`DEFAULT_ALLOWED_ORIGINS`])
//!
//! Entries are trimmed and blanks are dropped, so `"a, ,b,"` allows `a` and
//! `b`. An empty list blocks every cross-origin request.

use std::env;

pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
        }
    }
}

impl CorsConfig {
    #[must_use]
    pub fn from_env() -> Self {
        match env::var("ALLOWED_ORIGINS") {
            Ok(raw) => Self {
                allowed_origins: parse_origins(&raw),
            },
            Err(_) => Self::default(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
