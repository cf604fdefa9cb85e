use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse};
use chrono::Utc;
use tracing::debug;

use crate::errors::CounterError;
use crate::models::{CounterResponse, VisitPayload};
use crate::service;
use crate::state::AppState;
use crate::ui::render_index;

pub async fn index() -> Html<String> {
    Html(render_index())
}

/// Cross-origin preflight: acknowledged without touching the store.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

pub async fn update_counter(
    State(state): State<AppState>,
    payload: Option<Json<VisitPayload>>,
) -> Result<impl IntoResponse, CounterError> {
    if let Some(Json(visit)) = payload {
        debug!(
            page = visit.page.as_deref().unwrap_or("/"),
            referrer = %visit.referrer,
            user_agent = visit.short_user_agent(),
            "visit payload received"
        );
    }

    let backend = match &*state.backend {
        Ok(backend) => backend,
        Err(err) => return Err(err.clone()),
    };
    let store = backend.store.lock().await;
    let snapshot = service::record_visit(&*store, Utc::now()).await?;

    Ok((
        StatusCode::OK,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(CounterResponse::new(snapshot, &backend.config)),
    ))
}
