//! Configuration and CLI argument handling

use std::{sync::Arc, time::Duration};
use clap::{Parser, ValueEnum};

use crate::utils::{Clock, InstantClock, SystemClock};

/// Which time source drives the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClockKind {
    /// Wall-clock time
    Wall,
    /// Monotonic time, immune to wall-clock adjustments
    Monotonic,
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-keypad")]
#[command(about = "A keypad-driven countdown engine controlled over a local HTTP API")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Countdown tick cadence in milliseconds
    #[arg(short, long, default_value = "100", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Lead-in delay before the deadline is computed, in milliseconds
    #[arg(long, default_value = "0")]
    pub start_delay_ms: u64,

    /// Time source for deadlines
    #[arg(long, value_enum, default_value_t = ClockKind::Wall)]
    pub clock: ClockKind,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Timing parameters for the countdown task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownSettings {
    pub tick_interval: Duration,
    pub start_delay: Duration,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            start_delay: Duration::ZERO,
        }
    }
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

    pub fn countdown_settings(&self) -> CountdownSettings {
        CountdownSettings {
            tick_interval: Duration::from_millis(self.tick_ms),
            start_delay: Duration::from_millis(self.start_delay_ms),
        }
    }

    pub fn build_clock(&self) -> Arc<dyn Clock> {
        match self.clock {
            ClockKind::Wall => Arc::new(SystemClock),
            ClockKind::Monotonic => Arc::new(InstantClock::new()),
        }
    }
}
