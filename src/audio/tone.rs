//! Tone generator and the cues built on it

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

/// Audible cues the console plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Click,
    Beep,
    Warning,
    Completion,
}

impl Cue {
    /// Gain at full volume
    pub fn ceiling(&self) -> f32 {
        match self {
            Cue::Click | Cue::Beep => 0.05,
            Cue::Warning => 0.08,
            Cue::Completion => 0.1,
        }
    }
}

/// A single sine tone, optionally started some time after it is queued
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_ms: u64,
    pub gain: f32,
    pub delay_ms: u64,
}

impl Tone {
    pub fn new(frequency_hz: f32, duration_ms: u64, gain: f32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            gain: gain.clamp(0.0, 1.0),
            delay_ms: 0,
        }
    }

    pub fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

/// Something that can make a tone audible.
///
/// `play` must return promptly: callers hold the engine lock while queueing
/// cues. Failures stay inside the sink.
pub trait ToneSink: Send + Sync {
    fn play(&self, tone: Tone);
}

const COMPLETION_NOTES: [f32; 3] = [800.0, 1000.0, 800.0];
const COMPLETION_NOTE_MS: u64 = 300;
const COMPLETION_SPACING_MS: u64 = 400;

/// Fire-and-forget tone playback with the console's stock cues
#[derive(Clone)]
pub struct ToneGenerator {
    sink: Arc<dyn ToneSink>,
}

impl ToneGenerator {
    pub fn new(sink: Arc<dyn ToneSink>) -> Self {
        Self { sink }
    }

    pub fn play_tone(&self, frequency_hz: f32, duration_ms: u64, gain: f32) {
        self.sink.play(Tone::new(frequency_hz, duration_ms, gain));
    }

    pub fn click(&self, gain: f32) {
        debug!("cue: click (gain {:.3})", gain);
        self.play_tone(600.0, 100, gain);
    }

    /// Short blip used for adjustment and volume feedback
    pub fn beep(&self, gain: f32) {
        debug!("cue: beep (gain {:.3})", gain);
        self.play_tone(500.0, 50, gain);
    }

    pub fn warning(&self, gain: f32) {
        debug!("cue: warning (gain {:.3})", gain);
        self.play_tone(400.0, 150, gain);
    }

    /// Three notes 400ms apart. All three are queued up front with delays,
    /// so this returns immediately.
    pub fn completion(&self, gain: f32) {
        debug!("cue: completion (gain {:.3})", gain);
        for (i, &frequency) in COMPLETION_NOTES.iter().enumerate() {
            let tone = Tone::new(frequency, COMPLETION_NOTE_MS, gain)
                .delayed(i as u64 * COMPLETION_SPACING_MS);
            self.sink.play(tone);
        }
    }

    pub fn cue(&self, cue: Cue, gain: f32) {
        match cue {
            Cue::Click => self.click(gain),
            Cue::Beep => self.beep(gain),
            Cue::Warning => self.warning(gain),
            Cue::Completion => self.completion(gain),
        }
    }
}

impl std::fmt::Debug for ToneGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToneGenerator").finish_non_exhaustive()
    }
}
