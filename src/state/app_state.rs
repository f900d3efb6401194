//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::{
    config::CountdownSettings,
    tasks::{countdown_task, CountdownRun},
    utils::Clock,
};
use super::{CountdownPhase, CountdownState, DigitBuffer, KeypadLabels, ParsedDuration, RemainingTime};

/// Bookkeeping for the single countdown that may be active
#[derive(Debug, Default)]
struct RunSlot {
    phase: CountdownPhase,
    /// Bumped on every start and stop; ticks from an older epoch are dropped
    epoch: u64,
    cancel_tx: Option<watch::Sender<bool>>,
    /// Duration the current run was started with
    target: Option<ParsedDuration>,
}

/// Everything the presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: CountdownPhase,
    /// True while the keypad should be shown
    pub input_mode: bool,
    /// Duration the running countdown was started with
    pub target: Option<ParsedDuration>,
    pub buffer: String,
    pub keypad: KeypadLabels,
    pub countdown: CountdownState,
}

/// Application state: keypad buffer, countdown engine and their observable cells
#[derive(Debug)]
pub struct AppState {
    buffer: Mutex<DigitBuffer>,
    run: Mutex<RunSlot>,
    pub settings: CountdownSettings,
    clock: Arc<dyn Clock>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Latest keypad labels
    keypad_tx: watch::Sender<KeypadLabels>,
    /// Keypad visible (Idle) or countdown visible (Running)
    input_mode_tx: watch::Sender<bool>,
    /// Latest countdown state
    countdown_tx: watch::Sender<CountdownState>,
    /// Every emitted countdown state, ticks and resets alike
    tick_tx: broadcast::Sender<CountdownState>,
}

impl AppState {
    /// Create a new idle AppState with an empty keypad
    pub fn new(port: u16, host: String, settings: CountdownSettings, clock: Arc<dyn Clock>) -> Self {
        let (keypad_tx, _) = watch::channel(KeypadLabels::default());
        let (input_mode_tx, _) = watch::channel(true);
        let (countdown_tx, _) = watch::channel(CountdownState::zero());
        let (tick_tx, _) = broadcast::channel(256);

        Self {
            buffer: Mutex::new(DigitBuffer::new()),
            run: Mutex::new(RunSlot::default()),
            settings,
            clock,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            keypad_tx,
            input_mode_tx,
            countdown_tx,
            tick_tx,
        }
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Type a digit on the keypad. Ignored while a countdown is running.
    pub fn type_digit(&self, digit: u8) -> Result<bool, String> {
        self.record_action("digit");
        self.update_buffer(|buffer| buffer.type_digit(digit))
    }

    /// Delete the last typed digit. Ignored while a countdown is running.
    pub fn delete_digit(&self) -> Result<bool, String> {
        self.record_action("delete");
        self.update_buffer(DigitBuffer::delete)
    }

    /// Apply a buffer mutation and republish the keypad labels if it changed.
    ///
    /// Holds the run lock throughout (order: run, then buffer) so a concurrent
    /// start either sees the keystroke or makes it a no-op.
    fn update_buffer<F>(&self, mutate: F) -> Result<bool, String>
    where
        F: FnOnce(&mut DigitBuffer) -> bool,
    {
        let run = self.run.lock()
            .map_err(|e| format!("Failed to lock countdown run: {}", e))?;
        if run.phase == CountdownPhase::Running {
            debug!("Ignoring keypad input while running");
            return Ok(false);
        }

        let mut buffer = self.buffer.lock()
            .map_err(|e| format!("Failed to lock digit buffer: {}", e))?;
        if !mutate(&mut buffer) {
            debug!("Keypad input ignored, buffer is \"{}\"", buffer.digits());
            return Ok(false);
        }
        debug!("Buffer is now \"{}\"", buffer.digits());
        self.keypad_tx.send_replace(ParsedDuration::from(&*buffer).labels());
        drop(buffer);
        drop(run);
        Ok(true)
    }

    /// Start counting down from the current keypad value.
    ///
    /// Returns `Ok(false)` when a countdown is already running. Must be called
    /// from within a tokio runtime.
    pub fn start_countdown(self: &Arc<Self>) -> Result<bool, String> {
        let mut run = self.run.lock()
            .map_err(|e| format!("Failed to lock countdown run: {}", e))?;

        if run.phase == CountdownPhase::Running {
            debug!("Countdown already running, start ignored");
            return Ok(false);
        }

        let duration = self.parsed_duration()?;
        let (cancel_tx, cancel_rx) = watch::channel(false);
        run.epoch += 1;
        run.phase = CountdownPhase::Running;
        run.cancel_tx = Some(cancel_tx);
        run.target = Some(duration);
        let epoch = run.epoch;
        self.input_mode_tx.send_replace(false);
        drop(run);

        self.record_action("start");
        info!(
            "Starting countdown {:02}h {:02}m {:02}s (run {})",
            duration.hours, duration.minutes, duration.seconds, epoch
        );

        let run = CountdownRun {
            epoch,
            duration,
            settings: self.settings,
            cancel_rx,
        };
        tokio::spawn(countdown_task(Arc::clone(self), run));
        Ok(true)
    }

    /// Stop any running countdown and reset everything to the initial state.
    /// Safe to call while idle.
    pub fn stop_countdown(&self) -> Result<(), String> {
        self.record_action("stop");
        self.stop_run(None).map(|_| ())
    }

    /// Auto-stop issued by the countdown task when its deadline is reached
    pub(crate) fn finish_countdown(&self, epoch: u64) -> Result<bool, String> {
        self.stop_run(Some(epoch))
    }

    fn stop_run(&self, expected_epoch: Option<u64>) -> Result<bool, String> {
        let mut run = self.run.lock()
            .map_err(|e| format!("Failed to lock countdown run: {}", e))?;

        if let Some(epoch) = expected_epoch {
            if run.epoch != epoch || run.phase != CountdownPhase::Running {
                debug!("Run {} already superseded, skipping auto-stop", epoch);
                return Ok(false);
            }
        }

        let was_running = run.phase == CountdownPhase::Running;
        run.epoch += 1;
        run.phase = CountdownPhase::Idle;
        run.target = None;
        if let Some(cancel_tx) = run.cancel_tx.take() {
            // The task may already be gone; that is fine
            let _ = cancel_tx.send(true);
        }

        // Reset and publish under the run lock so no start can interleave
        self.buffer.lock()
            .map_err(|e| format!("Failed to lock digit buffer: {}", e))?
            .reset();
        self.keypad_tx.send_replace(KeypadLabels::default());
        self.publish(CountdownState::zero());
        self.input_mode_tx.send_replace(true);
        drop(run);

        if was_running {
            info!("Countdown stopped");
        } else {
            debug!("Stop while idle, state reset");
        }
        Ok(was_running)
    }

    /// Publish a tick from run `epoch`. Returns false if the run was superseded.
    pub(crate) fn publish_tick(&self, epoch: u64, state: CountdownState) -> Result<bool, String> {
        let run = self.run.lock()
            .map_err(|e| format!("Failed to lock countdown run: {}", e))?;

        if run.epoch != epoch || run.phase != CountdownPhase::Running {
            return Ok(false);
        }
        // Published under the run lock so a concurrent stop always lands last
        self.publish(state);
        drop(run);
        Ok(true)
    }

    fn publish(&self, state: CountdownState) {
        if self.tick_tx.receiver_count() > 0 {
            if let Err(e) = self.tick_tx.send(state.clone()) {
                warn!("Failed to send countdown tick: {}", e);
            }
        }
        self.countdown_tx.send_replace(state);
    }

    pub fn phase(&self) -> Result<CountdownPhase, String> {
        self.run.lock()
            .map(|run| run.phase)
            .map_err(|e| format!("Failed to lock countdown run: {}", e))
    }

    /// Current keypad value as hours/minutes/seconds
    pub fn parsed_duration(&self) -> Result<ParsedDuration, String> {
        self.buffer.lock()
            .map(|buffer| ParsedDuration::from(&*buffer))
            .map_err(|e| format!("Failed to lock digit buffer: {}", e))
    }

    /// Consistent view of all observable state, read under the run lock
    pub fn snapshot(&self) -> Result<Snapshot, String> {
        let run = self.run.lock()
            .map_err(|e| format!("Failed to lock countdown run: {}", e))?;
        let buffer = self.buffer.lock()
            .map(|buffer| buffer.digits().to_string())
            .map_err(|e| format!("Failed to lock digit buffer: {}", e))?;

        Ok(Snapshot {
            phase: run.phase,
            input_mode: *self.input_mode_tx.borrow(),
            target: run.target,
            buffer,
            keypad: self.keypad_tx.borrow().clone(),
            countdown: self.countdown_tx.borrow().clone(),
        })
    }

    pub fn subscribe_keypad(&self) -> watch::Receiver<KeypadLabels> {
        self.keypad_tx.subscribe()
    }

    pub fn subscribe_input_mode(&self) -> watch::Receiver<bool> {
        self.input_mode_tx.subscribe()
    }

    pub fn subscribe_countdown(&self) -> watch::Receiver<CountdownState> {
        self.countdown_tx.subscribe()
    }

    /// Every emitted state in order, including the reset on stop
    pub fn subscribe_ticks(&self) -> broadcast::Receiver<CountdownState> {
        self.tick_tx.subscribe()
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Server uptime, e.g. `"1h 2m 3s"`
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed().as_secs())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

/// Largest non-zero unit first: `"42s"`, `"3m 0s"`, `"26h 0m 5s"`
fn format_uptime(total_secs: u64) -> String {
    let remaining = RemainingTime::from_millis(total_secs.saturating_mul(1000));
    match (remaining.hours, remaining.minutes) {
        (0, 0) => format!("{}s", remaining.seconds),
        (0, minutes) => format!("{}m {}s", minutes, remaining.seconds),
        (hours, minutes) => format!("{}h {}m {}s", hours, minutes, remaining.seconds),
    }
}
