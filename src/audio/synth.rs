//! Sample rendering for tones

use std::f32::consts::PI;

use super::Tone;

pub const SAMPLE_RATE: u32 = 44_100;

/// Level the envelope decays toward by the end of a tone
const RAMP_FLOOR: f32 = 0.01;

/// Render a tone as mono f32 samples.
///
/// The gain starts at `tone.gain` and falls exponentially to 0.01 across the
/// tone. Tones quieter than the floor are held flat instead of ramping up.
pub fn render(tone: &Tone, sample_rate: u32) -> Vec<f32> {
    let len = (tone.duration_ms * sample_rate as u64 / 1000) as usize;
    if tone.gain <= 0.0 || len == 0 {
        return vec![0.0; len];
    }

    let start = tone.gain;
    let end = RAMP_FLOOR.min(start);
    let step = 2.0 * PI * tone.frequency_hz / sample_rate as f32;

    (0..len)
        .map(|i| {
            let progress = i as f32 / len as f32;
            let envelope = start * (end / start).powf(progress);
            envelope * (step * i as f32).sin()
        })
        .collect()
}
