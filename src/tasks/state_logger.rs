//! Logs countdown progress as an observer of the published state

use std::sync::Arc;
use tracing::{debug, info};

use crate::state::AppState;

/// Log each new second on the countdown label and every switch between
/// keypad and countdown view. Ends once the application state is dropped.
pub async fn state_logger_task(state: Arc<AppState>) {
    info!("Starting state logger task");

    let mut countdown_rx = state.subscribe_countdown();
    let mut input_mode_rx = state.subscribe_input_mode();
    drop(state);

    let mut last_label = countdown_rx.borrow_and_update().remaining_label.clone();

    loop {
        tokio::select! {
            changed = countdown_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let label = countdown_rx.borrow_and_update().remaining_label.clone();
                if label != last_label {
                    debug!("Countdown: {}", label);
                    last_label = label;
                }
            }
            changed = input_mode_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                if *input_mode_rx.borrow_and_update() {
                    info!("Keypad active");
                } else {
                    info!("Countdown view active");
                }
            }
        }
    }

    debug!("State logger task finished");
}
