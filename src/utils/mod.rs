//! Utility functions module
//! 
//! Time sources and process signal handling.

pub mod clock;
pub mod signals;

// Re-export main items
pub use clock::{Clock, InstantClock, SystemClock};
pub use signals::shutdown_signal;
