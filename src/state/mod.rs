//! State management module
//! 
//! This module contains all state-related structures and their management logic.

pub mod app_state;
pub mod audio_settings;
pub mod navigation;
pub mod timer_config;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, CommandResult};
pub use audio_settings::AudioSettings;
pub use navigation::{Navigator, View};
pub use timer_config::TimerConfig;
pub use timer_state::{TimerPhase, TimerState};
