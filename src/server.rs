use crate::config::{Config, OUTPUT_BUCKET};
use crate::error::{InvocationError, ServiceError};
use crate::event::StorageEvent;
use crate::handler;
use crate::preprocessing::{Calibration, Pipeline};
use crate::storage::{FsObjectStore, ObjectStore};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    pub pipeline: Arc<Pipeline>,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Run the HTTP server
pub async fn run(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let store = FsObjectStore::new(config.storage_root.clone());
    tracing::info!("Serving objects from {}", store.root().display());

    let state = AppState {
        store: Arc::new(store),
        pipeline: Arc::new(Pipeline::new(Calibration::default())),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handle_event))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle one storage trigger delivery
///
/// Processing failures are logged and acknowledged; only a malformed
/// envelope is answered with an error.
async fn handle_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ServiceError> {
    let event = StorageEvent::from_request(&headers, &body)?;
    event.log_metadata();

    let name = event.name().to_string();
    let outcome = tokio::task::spawn_blocking(move || {
        handler::process_event(
            state.store.as_ref(),
            &state.pipeline,
            OUTPUT_BUCKET,
            &event,
        )
    })
    .await
    .unwrap_or_else(|e| Err(InvocationError::Worker(e.to_string())));

    match outcome {
        Ok(outcome) => tracing::info!(
            "Processed image saved to {}/{} ({} bytes, {} digit regions, {}ms)",
            outcome.bucket,
            outcome.name,
            outcome.bytes_written,
            outcome.components_kept,
            outcome.processing_time_ms
        ),
        Err(e) => tracing::error!("Failed to process image {}: {}", name, e),
    }

    Ok(StatusCode::OK)
}

/// Handle health check requests
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
