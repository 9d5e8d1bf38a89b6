//! HTTP front door - Slack Events API webhook and health probe

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::application::errors::BotError;
use crate::application::services::EventService;

/// Shared state for axum handlers
#[derive(Clone)]
pub struct AppState {
    events: Arc<EventService>,
}

impl AppState {
    pub fn new(events: Arc<EventService>) -> Self {
        Self { events }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Build the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/slack/events", post(slack_events))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

fn not_ok() -> Json<Value> {
    Json(json!({ "ok": false }))
}

/// POST /slack/events
///
/// Always answers 200: Slack retries on anything else. URL verification is
/// answered directly; every other payload goes to the event service.
async fn slack_events(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected non-JSON event payload");
            return not_ok();
        }
    };

    if payload.get("type").and_then(Value::as_str) == Some("url_verification") {
        let challenge = payload.get("challenge").cloned().unwrap_or(Value::Null);
        return Json(json!({ "challenge": challenge }));
    }

    let events = state.events.clone();
    match tokio::spawn(async move { events.handle_event(payload).await }).await {
        Ok(outcome) => match serde_json::to_value(outcome) {
            Ok(body) => Json(body),
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode event outcome");
                not_ok()
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "Event handling failed");
            not_ok()
        }
    }
}

/// Bind and serve until Ctrl-C
pub async fn serve(bind: &str, state: AppState) -> Result<(), BotError> {
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|e| BotError::Network(format!("failed to bind {}: {}", bind, e)))?;
    tracing::info!(%bind, "HTTP server listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            tracing::info!("Shutting down");
        })
        .await
        .map_err(|e| BotError::Server(e.to_string()))
}
