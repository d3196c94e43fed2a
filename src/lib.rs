//! Digital Timer - A countdown timer console with synthesized audio cues
//! 
//! This library provides the countdown engine, its tick schedule, the tone
//! generator behind the console's audible cues, and the HTTP API that drives
//! them.

pub mod audio;
pub mod config;
pub mod engine;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{TimerEngine, TimerEvent, TimerSnapshot};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
