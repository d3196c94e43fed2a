//! API response and request structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    engine::{Preset, TimerSnapshot},
    state::View,
};

pub const MODEL_NAME: &str = "DIGITAL-TIMER-2024";

/// Response for every timer command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    /// False when the command was ignored in the current state
    pub accepted: bool,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, accepted: bool, timer: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            accepted,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Build a response from a command outcome
    pub fn from_command(message: &str, accepted: bool, timer: TimerSnapshot) -> Self {
        if accepted {
            Self::new(status_of(&timer).to_string(), message.to_string(), true, timer)
        } else {
            Self::new(
                "ignored".to_string(),
                format!("{} ignored in current state", message),
                false,
                timer,
            )
        }
    }
}

fn status_of(timer: &TimerSnapshot) -> &'static str {
    if timer.is_running {
        "running"
    } else if timer.is_completed {
        "completed"
    } else {
        "stopped"
    }
}

/// Body for POST /timer/preset
#[derive(Debug, Clone, Deserialize)]
pub struct PresetRequest {
    pub minutes: u8,
    pub seconds: u8,
}

/// Body for POST /audio/volume
#[derive(Debug, Clone, Deserialize)]
pub struct VolumeRequest {
    pub volume: u8,
}

/// Response for navigation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewResponse {
    pub view: View,
    pub label: String,
    pub changed: bool,
    pub timestamp: DateTime<Utc>,
}

impl ViewResponse {
    pub fn new(view: View, changed: bool) -> Self {
        Self {
            view,
            label: view.label().to_string(),
            changed,
            timestamp: Utc::now(),
        }
    }
}

/// Preset catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetResponse {
    pub label: String,
    pub minutes: u8,
    pub seconds: u8,
    pub display: String,
}

impl From<Preset> for PresetResponse {
    fn from(preset: Preset) -> Self {
        Self {
            label: preset.label.to_string(),
            minutes: preset.minutes,
            seconds: preset.seconds,
            display: format!("{}:{:02}", preset.minutes, preset.seconds),
        }
    }
}

/// Device details shown on the settings screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub model: String,
    pub version: String,
    pub status: String,
}

impl SystemInfo {
    pub fn current() -> Self {
        Self {
            model: MODEL_NAME.to_string(),
            version: format!("v{}", env!("CARGO_PKG_VERSION")),
            status: "ONLINE".to_string(),
        }
    }
}

/// Enhanced status response with timer information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub view: View,
    pub system: SystemInfo,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
