//! Countdown background task

use std::sync::Arc;
use tokio::{
    sync::watch,
    time::{interval, sleep, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::{
    config::CountdownSettings,
    state::{AppState, CountdownState, ParsedDuration},
};

/// Everything a single countdown run needs, captured at start time
#[derive(Debug)]
pub struct CountdownRun {
    pub epoch: u64,
    pub duration: ParsedDuration,
    pub settings: CountdownSettings,
    pub cancel_rx: watch::Receiver<bool>,
}

/// Resolves once the run is cancelled or its owner is gone
async fn cancelled(cancel_rx: &mut watch::Receiver<bool>) {
    let _ = cancel_rx.wait_for(|&cancel| cancel).await;
}

/// Recompute the remaining time on every tick until the deadline or cancellation.
///
/// The first state is emitted before the first wait, so even a zero duration
/// publishes `00:00:00` once before the automatic stop.
pub async fn countdown_task(state: Arc<AppState>, mut run: CountdownRun) {
    let epoch = run.epoch;

    if !run.settings.start_delay.is_zero() {
        debug!("Run {} waiting {:?} before starting", epoch, run.settings.start_delay);
        tokio::select! {
            _ = sleep(run.settings.start_delay) => {}
            _ = cancelled(&mut run.cancel_rx) => {
                debug!("Run {} cancelled during lead-in", epoch);
                return;
            }
        }
    }

    let clock = state.clock();
    let total_millis = i64::try_from(run.duration.total_millis()).unwrap_or(i64::MAX);
    let target = clock.now_millis().saturating_add(total_millis);

    let mut ticker = interval(run.settings.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // First tick completes immediately
    ticker.tick().await;

    loop {
        let now = clock.now_millis().min(target);
        let tick = CountdownState::at(target, now);
        debug!("Run {} tick: {}", epoch, tick.remaining_label);

        match state.publish_tick(epoch, tick) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Run {} superseded, exiting", epoch);
                return;
            }
            Err(e) => {
                error!("Failed to publish countdown tick: {}", e);
                return;
            }
        }

        if now >= target {
            break;
        }

        tokio::select! {
            _ = ticker.tick() => {}
            _ = cancelled(&mut run.cancel_rx) => {
                debug!("Run {} cancelled", epoch);
                return;
            }
        }
    }

    info!("Countdown reached 00:00:00");
    if let Err(e) = state.finish_countdown(epoch) {
        error!("Failed to stop finished countdown: {}", e);
    }
}
