// src/server.rs
use axum::{body::Bytes, extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use std::sync::Arc;
use tracing::{error, info};

use crate::normalize::normalize_bytes;
use crate::scoring::ResultsView;
use crate::store::{load_display, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SessionStore>,
    pub key: String,
}

type HandlerError = (StatusCode, String);

fn internal(e: anyhow::Error) -> HandlerError {
    error!(error = %e, "session store failure");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// Normalized view of whatever is currently stored.
pub async fn get_results(State(state): State<Arc<AppState>>) -> Result<Json<ResultsView>, HandlerError> {
    let model = load_display(state.store.as_ref(), &state.key).map_err(internal)?;
    Ok(Json(model.into()))
}

/// Stores the body verbatim; it is only interpreted when read back.
pub async fn put_results(State(state): State<Arc<AppState>>, body: Bytes) -> Result<StatusCode, HandlerError> {
    state.store.set(&state.key, &body).map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_results(State(state): State<Arc<AppState>>) -> Result<StatusCode, HandlerError> {
    state.store.remove(&state.key).map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Normalizes the body without touching the store. Malformed bodies, invalid
/// UTF-8 included, are not an HTTP error; they come back with `parseErrorMessage` set.
pub async fn normalize_body(body: Bytes) -> Json<ResultsView> {
    Json(normalize_bytes(Some(&body[..])).into())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/results", get(get_results).put(put_results).delete(delete_results))
        .route("/results/normalize", post(normalize_body))
        .with_state(Arc::new(state))
}

pub async fn run_server(state: AppState, addr: &str) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, "serving analysis results");
    axum::serve(listener, app).await?;
    Ok(())
}
