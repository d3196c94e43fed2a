//! Countdown tick background task

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{engine::TimerEvent, state::AppState};

/// Background task that feeds scheduler ticks into the engine.
///
/// Runs until the scheduler side of the channel is dropped.
pub async fn tick_task(state: Arc<AppState>, mut tick_rx: mpsc::Receiver<u64>) {
    info!("Starting tick task");

    while let Some(generation) = tick_rx.recv().await {
        match state.scheduled_tick(generation) {
            Ok(events) => {
                for event in events {
                    match event {
                        TimerEvent::Tick { remaining_seconds } => {
                            debug!("Tick processed, {}s remaining", remaining_seconds);
                        }
                        TimerEvent::WarningThreshold { remaining_seconds } => {
                            info!("Warning threshold crossed at {}s", remaining_seconds);
                        }
                        TimerEvent::Completed => {
                            info!("Countdown finished");
                        }
                    }
                }
            }
            Err(e) => {
                error!("Failed to process tick: {}", e);
            }
        }
    }

    info!("Tick channel closed, stopping tick task");
}
