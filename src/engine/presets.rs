//! Preset durations offered on the console

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub label: &'static str,
    pub minutes: u8,
    pub seconds: u8,
}

pub const PRESETS: [Preset; 4] = [
    Preset { label: "COFFEE", minutes: 3, seconds: 0 },
    Preset { label: "COOKING", minutes: 15, seconds: 0 },
    Preset { label: "WORKOUT", minutes: 1, seconds: 30 },
    Preset { label: "POWER NAP", minutes: 20, seconds: 0 },
];

/// Look a preset up by label. Case is ignored and `-`, `_` and spaces
/// are interchangeable, so "power-nap" finds POWER NAP.
pub fn find_preset(name: &str) -> Option<Preset> {
    let wanted = normalize(name);
    PRESETS.iter().copied().find(|p| normalize(p.label) == wanted)
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | '_' | ' ' => ' ',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_preset() {
        let nap = find_preset("power-nap").unwrap();
        assert_eq!((nap.minutes, nap.seconds), (20, 0));

        let workout = find_preset("Workout").unwrap();
        assert_eq!((workout.minutes, workout.seconds), (1, 30));

        assert!(find_preset("tea").is_none());
    }
}
