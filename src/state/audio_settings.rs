//! Volume and mute settings

use serde::{Deserialize, Serialize};

use crate::audio::Cue;

/// Playback volume as shown on the console slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// 0..=100
    pub volume: u8,
    pub muted: bool,
}

impl AudioSettings {
    pub fn new(volume: u8, muted: bool) -> Self {
        Self {
            volume: volume.min(100),
            muted,
        }
    }

    /// Set the volume; any audible level also lifts the mute
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        if self.volume > 0 {
            self.muted = false;
        }
    }

    /// Flip the mute flag and return the new value
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Gain to hand the tone generator for a cue. Zero when muted.
    pub fn gain(&self, cue: Cue) -> f32 {
        if self.muted {
            return 0.0;
        }
        self.volume as f32 / 100.0 * cue.ceiling()
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self::new(50, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gain_scales_with_volume() {
        let settings = AudioSettings::new(50, false);
        assert!((settings.gain(Cue::Click) - 0.025).abs() < 1e-6);
        assert!((settings.gain(Cue::Warning) - 0.04).abs() < 1e-6);
        assert!((settings.gain(Cue::Completion) - 0.05).abs() < 1e-6);

        let full = AudioSettings::new(100, false);
        assert!((full.gain(Cue::Beep) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_muted_gain_is_zero() {
        let settings = AudioSettings::new(80, true);
        assert_eq!(settings.gain(Cue::Click), 0.0);
        assert_eq!(settings.gain(Cue::Completion), 0.0);
    }

    #[test]
    fn test_set_volume_unmutes_and_clamps() {
        let mut settings = AudioSettings::new(50, true);
        settings.set_volume(0);
        assert!(settings.muted);

        settings.set_volume(150);
        assert_eq!(settings.volume, 100);
        assert!(!settings.muted);
    }

    #[test]
    fn test_toggle_mute() {
        let mut settings = AudioSettings::default();
        assert!(settings.toggle_mute());
        assert!(!settings.toggle_mute());
    }
}
