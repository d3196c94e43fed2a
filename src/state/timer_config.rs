//! Configured countdown duration

use serde::{Deserialize, Serialize};

/// Largest value either field may hold
pub const MAX_FIELD: u8 = 59;

/// Countdown duration chosen by the user, split into minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub minutes: u8,
    pub seconds: u8,
}

impl TimerConfig {
    /// Create a config, clamping both fields to 0..=59
    pub fn new(minutes: u8, seconds: u8) -> Self {
        Self {
            minutes: minutes.min(MAX_FIELD),
            seconds: seconds.min(MAX_FIELD),
        }
    }

    /// Total configured duration in seconds
    pub fn total_seconds(&self) -> u32 {
        self.minutes as u32 * 60 + self.seconds as u32
    }

    /// Whether there is anything to count down
    pub fn is_zero(&self) -> bool {
        self.total_seconds() == 0
    }

    /// Step the minutes field by one, saturating at the bounds
    pub fn step_minutes(&mut self, increment: bool) {
        self.minutes = step(self.minutes, increment);
    }

    /// Step the seconds field by one, saturating at the bounds
    pub fn step_seconds(&mut self, increment: bool) {
        self.seconds = step(self.seconds, increment);
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::new(5, 0)
    }
}

fn step(value: u8, increment: bool) -> u8 {
    if increment {
        value.saturating_add(1).min(MAX_FIELD)
    } else {
        value.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_five_minutes() {
        let config = TimerConfig::default();
        assert_eq!(config.minutes, 5);
        assert_eq!(config.seconds, 0);
        assert_eq!(config.total_seconds(), 300);
    }

    #[test]
    fn test_new_clamps_fields() {
        let config = TimerConfig::new(75, 200);
        assert_eq!(config, TimerConfig::new(59, 59));
        assert_eq!(config.total_seconds(), 59 * 60 + 59);
    }

    #[test]
    fn test_steps_stay_in_range() {
        for start in 0..=MAX_FIELD {
            let mut config = TimerConfig::new(start, start);
            config.step_minutes(true);
            config.step_seconds(false);
            assert!(config.minutes <= MAX_FIELD);
            assert!(config.seconds <= MAX_FIELD);
        }

        let mut config = TimerConfig::new(0, 59);
        config.step_minutes(false);
        config.step_seconds(true);
        assert_eq!(config, TimerConfig::new(0, 59));
    }
}
