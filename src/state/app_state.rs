//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use crate::{
    audio::Cue,
    engine::{TimerEngine, TimerEvent, TimerSnapshot},
};
use super::{Navigator, View};

/// Outcome of a command: whether it applied, and the timer afterwards
pub type CommandResult = Result<(bool, TimerSnapshot), String>;

/// Shared state behind the HTTP API and the tick task
#[derive(Debug)]
pub struct AppState {
    /// The countdown engine; all timer mutation goes through this lock
    pub engine: Arc<Mutex<TimerEngine>>,
    /// Current view and back stack
    pub navigator: Arc<Mutex<Navigator>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Lifecycle events from the tick loop
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Latest timer snapshot, refreshed after every command and tick
    pub timer_update_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Wrap an engine in shared state
    pub fn new(port: u16, host: String, engine: TimerEngine) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (timer_update_tx, timer_update_rx) = watch::channel(engine.snapshot());

        Self {
            engine: Arc::new(Mutex::new(engine)),
            navigator: Arc::new(Mutex::new(Navigator::new())),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Apply a command to the engine, record it and publish the new snapshot
    pub fn update_timer<F>(&self, action: &str, command: F) -> CommandResult
    where
        F: FnOnce(&mut TimerEngine) -> bool,
    {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;

        let accepted = command(&mut *engine);
        let snapshot = engine.snapshot();
        drop(engine); // Release the lock early

        self.record_action(action);
        self.publish(snapshot.clone());

        Ok((accepted, snapshot))
    }

    pub fn start(&self) -> CommandResult {
        self.update_timer("start", |engine| engine.start())
    }

    pub fn pause(&self) -> CommandResult {
        self.update_timer("pause", |engine| {
            engine.pause();
            true
        })
    }

    pub fn stop(&self) -> CommandResult {
        self.update_timer("stop", |engine| {
            engine.stop();
            true
        })
    }

    pub fn reset(&self) -> CommandResult {
        self.update_timer("reset", |engine| {
            engine.reset();
            true
        })
    }

    pub fn adjust_minutes(&self, increment: bool) -> CommandResult {
        let action = if increment { "minutes-up" } else { "minutes-down" };
        self.update_timer(action, |engine| engine.adjust_minutes(increment))
    }

    pub fn adjust_seconds(&self, increment: bool) -> CommandResult {
        let action = if increment { "seconds-up" } else { "seconds-down" };
        self.update_timer(action, |engine| engine.adjust_seconds(increment))
    }

    pub fn select_preset(&self, minutes: u8, seconds: u8) -> CommandResult {
        self.update_timer("preset", |engine| engine.select_preset(minutes, seconds))
    }

    pub fn set_volume(&self, volume: u8) -> CommandResult {
        self.update_timer("volume", |engine| {
            engine.set_volume(volume);
            true
        })
    }

    pub fn toggle_mute(&self) -> CommandResult {
        self.update_timer("mute", |engine| {
            engine.toggle_mute();
            true
        })
    }

    /// Handle a tick from the scheduler and fan out whatever it raised
    pub fn scheduled_tick(&self, generation: u64) -> Result<Vec<TimerEvent>, String> {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;

        let events = engine.scheduled_tick(generation);
        if events.is_empty() {
            return Ok(events);
        }
        let snapshot = engine.snapshot();
        drop(engine);

        self.publish(snapshot);
        for event in &events {
            // No subscribers is fine
            let _ = self.event_tx.send(event.clone());
        }

        Ok(events)
    }

    /// Get current timer snapshot
    pub fn get_timer_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.engine.lock()
            .map(|engine| engine.snapshot())
            .map_err(|e| format!("Failed to lock timer engine: {}", e))
    }

    /// Switch views, clicking as the console does
    pub fn navigate(&self, view: View) -> Result<View, String> {
        let mut navigator = self.navigator.lock()
            .map_err(|e| format!("Failed to lock navigator: {}", e))?;
        navigator.navigate(view);
        drop(navigator);

        info!("Navigated to {}", view);
        self.record_action(&format!("view-{}", view));
        self.click()?;
        Ok(view)
    }

    /// Go back one view. Returns whether anything changed, and the current view.
    pub fn back(&self) -> Result<(bool, View), String> {
        let mut navigator = self.navigator.lock()
            .map_err(|e| format!("Failed to lock navigator: {}", e))?;
        let moved = navigator.back();
        let current = navigator.current();
        drop(navigator);

        if moved {
            info!("Navigated back to {}", current);
            self.record_action("view-back");
            self.click()?;
        }
        Ok((moved, current))
    }

    /// Get the view currently showing
    pub fn get_view(&self) -> Result<View, String> {
        self.navigator.lock()
            .map(|navigator| navigator.current())
            .map_err(|e| format!("Failed to lock navigator: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn click(&self) -> Result<(), String> {
        let engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;
        engine.cue(Cue::Click);
        Ok(())
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn publish(&self, snapshot: TimerSnapshot) {
        if let Err(e) = self.timer_update_tx.send(snapshot) {
            warn!("Failed to send timer update: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audio::{NullSink, ToneGenerator},
        engine::IntervalScheduler,
        state::{AudioSettings, TimerConfig},
    };
    use std::time::Duration;

    fn app_state(minutes: u8, seconds: u8) -> AppState {
        let (scheduler, _rx) = IntervalScheduler::new(Duration::from_secs(1));
        let engine = TimerEngine::new(
            TimerConfig::new(minutes, seconds),
            AudioSettings::default(),
            ToneGenerator::new(Arc::new(NullSink)),
            Box::new(scheduler),
        );
        AppState::new(0, "127.0.0.1".to_string(), engine)
    }

    #[tokio::test]
    async fn test_command_publishes_snapshot() {
        let state = app_state(5, 0);
        let mut rx = state.timer_update_tx.subscribe();

        let (accepted, snapshot) = state.select_preset(3, 0).unwrap();
        assert!(accepted);
        assert_eq!(snapshot.display_time, "03:00");

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().configured_minutes, 3);
        assert_eq!(state.get_last_action().0.as_deref(), Some("preset"));
    }

    #[tokio::test]
    async fn test_scheduled_tick_broadcasts_events() {
        let state = app_state(0, 1);
        let mut events = state.event_tx.subscribe();

        let (accepted, _) = state.start().unwrap();
        assert!(accepted);

        // First arm of a fresh scheduler is generation 1
        assert!(state.scheduled_tick(0).unwrap().is_empty());
        let raised = state.scheduled_tick(1).unwrap();
        assert_eq!(raised.len(), 2);
        assert_eq!(events.recv().await.unwrap(), TimerEvent::Tick { remaining_seconds: 0 });
        assert_eq!(events.recv().await.unwrap(), TimerEvent::Completed);
        assert!(state.get_timer_snapshot().unwrap().is_completed);
    }

    #[test]
    fn test_navigation_back_stack() {
        let state = app_state(5, 0);
        assert_eq!(state.get_view().unwrap(), View::Timer);
        state.navigate(View::Settings).unwrap();
        assert_eq!(state.back().unwrap(), (true, View::Timer));
        assert_eq!(state.back().unwrap(), (false, View::Timer));
    }
}
