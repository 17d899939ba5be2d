use axum::{
    Router,
    routing::{delete, post},
};

use crate::state::AppState;

use super::controller::{create_holiday, delete_holiday, get_holidays};

pub fn init_holidays_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_holiday).get(get_holidays))
        .route("/{id}", delete(delete_holiday))
}
