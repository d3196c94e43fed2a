//! Timer engine module
//!
//! The countdown state machine, its tick schedule and the preset catalog.

pub mod display;
pub mod presets;
pub mod scheduler;
pub mod timer;

// Re-export main types
pub use display::format_time;
pub use presets::{find_preset, Preset, PRESETS};
pub use scheduler::{IntervalScheduler, TickScheduler};
pub use timer::{TimerEngine, TimerEvent, TimerSnapshot, WARNING_AT_SECONDS};
