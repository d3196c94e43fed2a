//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer", get(timer_handler))
        .route("/timer/start", post(start_handler))
        .route("/timer/pause", post(pause_handler))
        .route("/timer/stop", post(stop_handler))
        .route("/timer/reset", post(reset_handler))
        .route("/timer/minutes/:direction", post(adjust_minutes_handler))
        .route("/timer/seconds/:direction", post(adjust_seconds_handler))
        .route("/timer/preset", post(preset_handler))
        .route("/timer/stream", get(timer_stream_handler))
        .route("/presets", get(presets_handler))
        .route("/presets/:name", post(named_preset_handler))
        .route("/audio/volume", post(volume_handler))
        .route("/audio/mute", post(mute_handler))
        .route("/view/:view", post(view_handler))
        .route("/events", get(events_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
