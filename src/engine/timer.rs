//! Countdown state machine

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    audio::{Cue, ToneGenerator},
    state::{AudioSettings, TimerConfig, TimerPhase, TimerState},
};
use super::{display::format_time, scheduler::TickScheduler};

/// Pre-tick remaining value at which the warning cue sounds
pub const WARNING_AT_SECONDS: u32 = 11;

/// Lifecycle events raised by the tick loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    Tick { remaining_seconds: u32 },
    WarningThreshold { remaining_seconds: u32 },
    Completed,
}

/// Read-only view of the timer for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub configured_minutes: u8,
    pub configured_seconds: u8,
    pub remaining_seconds: u32,
    pub is_running: bool,
    pub is_completed: bool,
    pub phase: TimerPhase,
    pub display_time: String,
    /// Remaining share of the configured duration, 0.0 when nothing remains
    pub progress: f32,
    pub volume: u8,
    pub muted: bool,
}

/// The countdown engine.
///
/// Commands are synchronous and never fail: adjustments clamp and commands
/// issued in the wrong state are ignored. The tick schedule is armed on every
/// entry into `Running` and disarmed on every exit.
pub struct TimerEngine {
    config: TimerConfig,
    state: TimerState,
    audio: AudioSettings,
    tones: ToneGenerator,
    scheduler: Box<dyn TickScheduler>,
}

impl TimerEngine {
    pub fn new(
        config: TimerConfig,
        audio: AudioSettings,
        tones: ToneGenerator,
        scheduler: Box<dyn TickScheduler>,
    ) -> Self {
        Self {
            config,
            state: TimerState::new(),
            audio,
            tones,
            scheduler,
        }
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn audio(&self) -> AudioSettings {
        self.audio
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    /// Live countdown once started, the configured duration before that
    pub fn display_time(&self) -> String {
        if self.state.remaining_seconds > 0 {
            format_time(self.state.remaining_seconds)
        } else {
            format_time(self.config.total_seconds())
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let total = self.config.total_seconds();
        let remaining = self.state.remaining_seconds;
        let progress = if remaining > 0 && total > 0 {
            (remaining as f32 / total as f32).min(1.0)
        } else {
            0.0
        };

        TimerSnapshot {
            configured_minutes: self.config.minutes,
            configured_seconds: self.config.seconds,
            remaining_seconds: remaining,
            is_running: self.is_running(),
            is_completed: self.is_completed(),
            phase: self.state.phase,
            display_time: self.display_time(),
            progress,
            volume: self.audio.volume,
            muted: self.audio.muted,
        }
    }

    /// Start or resume the countdown.
    ///
    /// Seeds the remaining time from the configured duration only when
    /// nothing remains, so a paused countdown picks up where it left off.
    /// Returns false if already running or there is nothing to count down.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            debug!("start ignored: already running");
            return false;
        }
        if self.state.remaining_seconds == 0 {
            if self.config.is_zero() {
                debug!("start ignored: no duration configured");
                return false;
            }
            self.state.remaining_seconds = self.config.total_seconds();
        }

        self.state.phase = TimerPhase::Running;
        self.scheduler.arm();
        info!("Timer started with {}s remaining", self.state.remaining_seconds);
        self.cue(Cue::Click);
        true
    }

    pub fn pause(&mut self) {
        if self.is_running() {
            self.state.phase = TimerPhase::Paused;
            info!("Timer paused with {}s remaining", self.state.remaining_seconds);
        }
        self.scheduler.disarm();
        self.cue(Cue::Warning);
    }

    pub fn stop(&mut self) {
        self.state.phase = TimerPhase::Idle;
        self.state.remaining_seconds = 0;
        self.scheduler.disarm();
        info!("Timer stopped");
        self.cue(Cue::Warning);
    }

    /// Back to idle with the full configured duration loaded
    pub fn reset(&mut self) {
        self.state.phase = TimerPhase::Idle;
        self.state.remaining_seconds = self.config.total_seconds();
        self.scheduler.disarm();
        info!("Timer reset to {}", format_time(self.state.remaining_seconds));
        self.cue(Cue::Click);
    }

    pub fn adjust_minutes(&mut self, increment: bool) -> bool {
        if self.is_running() {
            debug!("adjust_minutes ignored while running");
            return false;
        }
        self.config.step_minutes(increment);
        debug!("Configured minutes now {}", self.config.minutes);
        self.cue(Cue::Beep);
        true
    }

    pub fn adjust_seconds(&mut self, increment: bool) -> bool {
        if self.is_running() {
            debug!("adjust_seconds ignored while running");
            return false;
        }
        self.config.step_seconds(increment);
        debug!("Configured seconds now {}", self.config.seconds);
        self.cue(Cue::Beep);
        true
    }

    /// Load a preset duration. Clears any remaining time so the display
    /// shows the new duration.
    pub fn select_preset(&mut self, minutes: u8, seconds: u8) -> bool {
        if self.is_running() {
            debug!("select_preset ignored while running");
            return false;
        }
        self.config = TimerConfig::new(minutes, seconds);
        self.state.remaining_seconds = 0;
        self.state.phase = TimerPhase::Idle;
        info!("Preset selected: {}", format_time(self.config.total_seconds()));
        self.cue(Cue::Click);
        true
    }

    /// Advance the countdown by one second.
    ///
    /// The warning cue keys off the value before decrementing, so it sounds
    /// on the 11 -> 10 step.
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        if !self.is_running() || self.state.remaining_seconds == 0 {
            return Vec::new();
        }

        let previous = self.state.remaining_seconds;
        self.state.remaining_seconds = previous - 1;
        let remaining = self.state.remaining_seconds;
        let mut events = vec![TimerEvent::Tick { remaining_seconds: remaining }];

        if remaining == 0 {
            self.state.phase = TimerPhase::Completed;
            self.scheduler.disarm();
            info!("Timer completed");
            self.cue(Cue::Completion);
            events.push(TimerEvent::Completed);
        } else if previous == WARNING_AT_SECONDS {
            info!("Timer entering final {} seconds", remaining);
            self.cue(Cue::Warning);
            events.push(TimerEvent::WarningThreshold { remaining_seconds: remaining });
        } else {
            debug!("tick: {}s remaining", remaining);
        }

        events
    }

    /// Tick delivered by the scheduler. Ticks from a schedule that has
    /// since been disarmed or re-armed are dropped.
    pub fn scheduled_tick(&mut self, generation: u64) -> Vec<TimerEvent> {
        if !self.scheduler.is_armed() || generation != self.scheduler.generation() {
            debug!("Dropping stale tick from generation {}", generation);
            return Vec::new();
        }
        self.tick()
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.audio.set_volume(volume);
        info!("Volume set to {}", self.audio.volume);
        self.cue(Cue::Beep);
    }

    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.audio.toggle_mute();
        info!("Audio {}", if muted { "muted" } else { "unmuted" });
        self.cue(Cue::Click);
        muted
    }

    /// Play a cue at the gain the current audio settings give it
    pub fn cue(&self, cue: Cue) {
        self.tones.cue(cue, self.audio.gain(cue));
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("audio", &self.audio)
            .field("armed", &self.scheduler.is_armed())
            .finish()
    }
}
