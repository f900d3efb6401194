//! Background tasks module
//! 
//! The periodic countdown task and the state logger that observes it.

pub mod countdown;
pub mod state_logger;

// Re-export main functions
pub use countdown::{countdown_task, CountdownRun};
pub use state_logger::state_logger_task;
