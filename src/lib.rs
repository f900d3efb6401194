//! Countdown Keypad - a keypad-driven countdown engine
//! 
//! Digits typed on a keypad form an `HH MM SS` duration. Starting the
//! countdown runs a periodic task that publishes the remaining time and three
//! progress-ring fractions until the deadline, then resets. A local HTTP API
//! lets an external UI send commands and read the published state.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, CountdownSettings};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
