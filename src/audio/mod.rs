//! Audio cue module
//!
//! Tone generation for the console's click, beep, warning and completion
//! cues, and the sinks that make them audible.

pub mod output;
pub mod synth;
pub mod tone;

// Re-export main types
pub use output::{open_sink, LogSink, NullSink};
#[cfg(feature = "audio")]
pub use output::RodioSink;
pub use tone::{Cue, Tone, ToneGenerator, ToneSink};
