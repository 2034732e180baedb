use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/today", get(handlers::get_today))
        .route("/api/days/:date", get(handlers::get_day))
        .route("/api/days/:date/tasks", post(handlers::set_task))
        .route("/api/days/:date/note", post(handlers::set_note))
        .route("/api/days/:date/clear", post(handlers::clear_tasks))
        .route("/api/wallet", get(handlers::get_wallet))
        .route("/api/wallet/spend", post(handlers::spend))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
