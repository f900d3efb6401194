//! Hours/minutes/seconds view over the keypad buffer

use serde::{Deserialize, Serialize};

use super::digit_buffer::{DigitBuffer, MAX_DIGITS};

const MILLIS_PER_SECOND: u64 = 1000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

/// Left-pad `raw` with zeros up to `width`. Longer input is returned as is.
pub fn pad_with_zeros(raw: &str, width: usize) -> String {
    format!("{:0>width$}", raw, width = width)
}

/// Two-digit groups sliced out of the padded buffer.
///
/// The groups are taken as typed: `"9900"` is 99 minutes, not 1h 39m.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDuration {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl ParsedDuration {
    /// Parse up to six decimal digits. Anything unparsable in a group reads as 0.
    pub fn from_digits(digits: &str) -> Self {
        let padded = pad_with_zeros(digits, MAX_DIGITS);
        let group = |range: std::ops::Range<usize>| {
            padded
                .get(range)
                .and_then(|slice| slice.parse::<u8>().ok())
                .unwrap_or(0)
        };

        Self {
            hours: group(0..2),
            minutes: group(2..4),
            seconds: group(4..6),
        }
    }

    pub fn total_millis(&self) -> u64 {
        u64::from(self.hours) * MILLIS_PER_HOUR
            + u64::from(self.minutes) * MILLIS_PER_MINUTE
            + u64::from(self.seconds) * MILLIS_PER_SECOND
    }

    pub fn is_zero(&self) -> bool {
        self.total_millis() == 0
    }

    /// Keypad labels, e.g. `("00h", "13m", "00s")`
    pub fn labels(&self) -> KeypadLabels {
        KeypadLabels {
            hours: format!("{:02}h", self.hours),
            minutes: format!("{:02}m", self.minutes),
            seconds: format!("{:02}s", self.seconds),
        }
    }
}

impl From<&DigitBuffer> for ParsedDuration {
    fn from(buffer: &DigitBuffer) -> Self {
        Self::from_digits(buffer.digits())
    }
}

/// Display labels shown above the keypad
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypadLabels {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl Default for KeypadLabels {
    fn default() -> Self {
        ParsedDuration::default().labels()
    }
}
