//! Countdown state and per-tick arithmetic

use serde::{Deserialize, Serialize};

/// Label shown whenever no countdown is running
pub const TIMER_AT_ZERO: &str = "00:00:00";

const MILLIS_PER_SECOND: u64 = 1000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

/// Engine phase. `Idle` is both the initial and the terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownPhase {
    #[default]
    Idle,
    Running,
}

impl CountdownPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountdownPhase::Idle => "idle",
            CountdownPhase::Running => "running",
        }
    }
}

/// Remaining time split greedily into whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingTime {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub millis: u64,
}

impl RemainingTime {
    pub fn from_millis(total: u64) -> Self {
        let mut rest = total;
        let hours = rest / MILLIS_PER_HOUR;
        rest -= hours * MILLIS_PER_HOUR;
        let minutes = rest / MILLIS_PER_MINUTE;
        rest -= minutes * MILLIS_PER_MINUTE;
        let seconds = rest / MILLIS_PER_SECOND;
        rest -= seconds * MILLIS_PER_SECOND;

        Self { hours, minutes, seconds, millis: rest }
    }

    /// `HH:MM:SS`; hours grow past two digits instead of wrapping at 24
    pub fn label(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// `numerator / denominator` clamped to [0, 1], or 0 when the denominator is 0
pub fn safely_divide_and_coerce(numerator: u64, denominator: u64) -> f32 {
    if denominator == 0 {
        return 0.0;
    }
    ((numerator as f64 / denominator as f64) as f32).clamp(0.0, 1.0)
}

/// State published to the presentation layer on every tick.
///
/// Each ring shows the unit remaining inside its parent cycle: the hours ring
/// carries the minutes left in the current hour, the minutes ring the seconds
/// left in the current minute, the seconds ring the milliseconds left in the
/// current second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownState {
    pub remaining_label: String,
    /// Minutes left in the current hour, over 60
    pub hours_progress: f32,
    /// Seconds left in the current minute, over 60
    pub minutes_progress: f32,
    /// Milliseconds left in the current second, over 1000
    pub seconds_progress: f32,
    pub is_running: bool,
}

impl CountdownState {
    /// The reset value: full rings, zero label, not running
    pub fn zero() -> Self {
        Self {
            remaining_label: TIMER_AT_ZERO.to_string(),
            hours_progress: 1.0,
            minutes_progress: 1.0,
            seconds_progress: 1.0,
            is_running: false,
        }
    }

    /// Running state for a countdown ending at `target_ms`, observed at `now_ms`.
    ///
    /// `now_ms` is clamped to the target so an overshooting tick lands exactly
    /// on `00:00:00` instead of going negative.
    pub fn at(target_ms: i64, now_ms: i64) -> Self {
        let now_ms = now_ms.min(target_ms);
        let remaining_ms = u64::try_from(target_ms - now_ms).unwrap_or(0);
        let remaining = RemainingTime::from_millis(remaining_ms);

        Self {
            remaining_label: remaining.label(),
            hours_progress: safely_divide_and_coerce(remaining.minutes, 60),
            minutes_progress: safely_divide_and_coerce(remaining.seconds, 60),
            seconds_progress: safely_divide_and_coerce(remaining.millis, 1000),
            is_running: true,
        }
    }

    pub fn progresses(&self) -> (f32, f32, f32) {
        (self.hours_progress, self.minutes_progress, self.seconds_progress)
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::zero()
    }
}
