//! State management module
//! 
//! Keypad buffer, duration parsing, countdown arithmetic and the
//! application state that ties them together.

pub mod digit_buffer;
pub mod duration;
pub mod countdown_state;
pub mod app_state;

// Re-export main types
pub use digit_buffer::{DigitBuffer, MAX_DIGITS};
pub use duration::{KeypadLabels, ParsedDuration};
pub use countdown_state::{CountdownPhase, CountdownState, RemainingTime, TIMER_AT_ZERO};
pub use app_state::{AppState, Snapshot};
