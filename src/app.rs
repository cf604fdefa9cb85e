use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/counter",
            get(handlers::update_counter)
                .post(handlers::update_counter)
                .options(handlers::preflight),
        )
        .with_state(state)
}
