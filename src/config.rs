//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::state::{AudioSettings, TimerConfig};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "digital-timer")]
#[command(about = "A countdown timer console with synthesized audio cues")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Initial countdown minutes (0-59)
    #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u8).range(0..=59))]
    pub minutes: u8,

    /// Initial countdown seconds (0-59)
    #[arg(short, long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=59))]
    pub seconds: u8,

    /// Initial volume (0-100)
    #[arg(long, default_value = "50", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub volume: u8,

    /// Start muted
    #[arg(long)]
    pub muted: bool,

    /// Tick period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Log tones instead of playing them
    #[arg(long)]
    pub silent: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig::new(self.minutes, self.seconds)
    }

    pub fn audio_settings(&self) -> AudioSettings {
        AudioSettings::new(self.volume, self.muted)
    }
}
