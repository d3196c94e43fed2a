//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

use crate::{
    engine::{find_preset, PRESETS},
    state::{AppState, CommandResult, View},
};
use super::responses::{
    ApiResponse, HealthResponse, PresetRequest, PresetResponse, StatusResponse, SystemInfo,
    ViewResponse, VolumeRequest,
};

type ApiResult = Result<Json<ApiResponse>, StatusCode>;

/// Turn a command outcome into a JSON response
fn respond(command: &str, result: CommandResult) -> ApiResult {
    match result {
        Ok((accepted, timer)) => {
            info!("{} endpoint called (accepted: {})", command, accepted);
            Ok(Json(ApiResponse::from_command(command, accepted, timer)))
        }
        Err(e) => {
            error!("Failed to apply {}: {}", command, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn parse_direction(direction: &str) -> Result<bool, StatusCode> {
    match direction {
        "up" | "inc" => Ok(true),
        "down" | "dec" => Ok(false),
        other => {
            warn!("Invalid adjustment direction: {}", other);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// Handle GET /timer - Current timer snapshot
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    match state.get_timer_snapshot() {
        Ok(timer) => Ok(Json(ApiResponse::from_command("Timer", true, timer))),
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond("Start", state.start())
}

/// Handle POST /timer/pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond("Pause", state.pause())
}

/// Handle POST /timer/stop - Stop and clear the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond("Stop", state.stop())
}

/// Handle POST /timer/reset - Reload the configured duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond("Reset", state.reset())
}

/// Handle POST /timer/minutes/:direction
pub async fn adjust_minutes_handler(
    State(state): State<Arc<AppState>>,
    Path(direction): Path<String>,
) -> ApiResult {
    let increment = parse_direction(&direction)?;
    respond("Adjust minutes", state.adjust_minutes(increment))
}

/// Handle POST /timer/seconds/:direction
pub async fn adjust_seconds_handler(
    State(state): State<Arc<AppState>>,
    Path(direction): Path<String>,
) -> ApiResult {
    let increment = parse_direction(&direction)?;
    respond("Adjust seconds", state.adjust_seconds(increment))
}

/// Handle POST /timer/preset - Load an arbitrary duration
pub async fn preset_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PresetRequest>,
) -> ApiResult {
    respond("Preset", state.select_preset(request.minutes, request.seconds))
}

/// Handle GET /presets - Preset catalog
pub async fn presets_handler() -> Json<Vec<PresetResponse>> {
    Json(PRESETS.iter().copied().map(PresetResponse::from).collect())
}

/// Handle POST /presets/:name - Load a catalog preset
pub async fn named_preset_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult {
    let Some(preset) = find_preset(&name) else {
        warn!("Unknown preset requested: {}", name);
        return Err(StatusCode::NOT_FOUND);
    };
    respond(preset.label, state.select_preset(preset.minutes, preset.seconds))
}

/// Handle POST /audio/volume
pub async fn volume_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VolumeRequest>,
) -> ApiResult {
    respond("Volume", state.set_volume(request.volume))
}

/// Handle POST /audio/mute - Toggle mute
pub async fn mute_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond("Mute", state.toggle_mute())
}

/// Handle POST /view/:view - Navigate, or go back with `back`
pub async fn view_handler(
    State(state): State<Arc<AppState>>,
    Path(target): Path<String>,
) -> Result<Json<ViewResponse>, StatusCode> {
    let result = if target == "back" {
        state.back().map(|(changed, view)| ViewResponse::new(view, changed))
    } else {
        let view: View = target.parse().map_err(|e| {
            warn!("{}", e);
            StatusCode::NOT_FOUND
        })?;
        state.navigate(view).map(|view| ViewResponse::new(view, true))
    };

    result.map(Json).map_err(|e| {
        error!("Failed to navigate: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle GET /timer/stream - Snapshot after every command and tick (SSE)
pub async fn timer_stream_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let mut rx = state.timer_update_tx.subscribe();
    let initial = rx.borrow_and_update().clone();

    let updates = stream::unfold(rx, |mut rx| async move {
        rx.changed().await.ok()?;
        let snapshot = rx.borrow_and_update().clone();
        Some((Event::default().event("timer").json_data(&snapshot), rx))
    });
    let stream = stream::once(async move { Event::default().event("timer").json_data(&initial) })
        .chain(updates);

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handle GET /events - Tick, warning and completion events (SSE)
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let rx = state.event_tx.subscribe();

    let stream = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    return Some((Event::default().event("lifecycle").json_data(&event), rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event stream lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handle GET /status - Return current console status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let view = match state.get_view() {
        Ok(v) => v,
        Err(e) => {
            error!("Failed to get current view: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        view,
        system: SystemInfo::current(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
