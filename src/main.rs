//! Digital Timer - A countdown timer console with synthesized audio cues
//!
//! This is the main entry point for the digital-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use digital_timer::{
    audio::{open_sink, ToneGenerator},
    config::Config,
    engine::{IntervalScheduler, TimerEngine},
    state::AppState,
    api::create_router,
    tasks::tick_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("digital_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting digital-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, duration={:02}:{:02}, volume={}{}",
          config.host, config.port, config.minutes, config.seconds, config.volume,
          if config.muted { " (muted)" } else { "" });

    // Audio output and the tick schedule are injected into the engine
    let tones = ToneGenerator::new(open_sink(config.silent));
    let (scheduler, tick_rx) = IntervalScheduler::new(config.tick_interval());
    let engine = TimerEngine::new(
        config.timer_config(),
        config.audio_settings(),
        tones,
        Box::new(scheduler),
    );

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), engine));

    // Start the tick background task
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_task(tick_state, tick_rx).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timer                  - Current timer state");
    info!("  POST /timer/start|pause|stop|reset");
    info!("  POST /timer/minutes/up|down  - Adjust minutes");
    info!("  POST /timer/seconds/up|down  - Adjust seconds");
    info!("  POST /timer/preset           - Load a duration");
    info!("  GET  /presets, POST /presets/:name");
    info!("  POST /audio/volume, /audio/mute");
    info!("  POST /view/home|timer|settings|back");
    info!("  GET  /timer/stream, /events  - Live updates (SSE)");
    info!("  GET  /status, /health");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
