//! Timer state structure and management

use serde::{Deserialize, Serialize};

/// Where the countdown is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

/// Countdown state. Running and completed are both read off the phase,
/// so they can never be true at the same time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub phase: TimerPhase,
}

impl TimerState {
    /// Create an idle timer state with nothing remaining
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the tick loop should be active
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// Check if the last countdown ran out (as opposed to being stopped)
    pub fn is_completed(&self) -> bool {
        self.phase == TimerPhase::Completed
    }
}
