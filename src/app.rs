use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/log/add", post(handlers::add_reps_form))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/log", post(handlers::add_reps))
        .route("/api/session", get(handlers::get_session))
        .route("/api/signin", post(handlers::sign_in))
        .route("/api/signout", post(handlers::sign_out))
        .with_state(state)
}
