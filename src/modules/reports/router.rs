use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    export_yearly_report, get_monthly_register, get_student_yearly_report, get_yearly_report,
};

pub fn init_reports_router() -> Router<AppState> {
    Router::new()
        .route("/attendance/yearly", get(get_yearly_report))
        .route("/attendance/yearly/export", get(export_yearly_report))
        .route(
            "/attendance/students/{id}/yearly",
            get(get_student_yearly_report),
        )
        .route("/attendance/monthly", get(get_monthly_register))
}
