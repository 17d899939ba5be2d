use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{check_date, delete_attendance, get_daily_attendance, save_attendance};

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(save_attendance))
        .route("/date-check", get(check_date))
        .route("/daily", get(get_daily_attendance))
        .route("/{id}", delete(delete_attendance))
}
