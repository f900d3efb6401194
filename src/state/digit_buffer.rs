//! Raw keypad input buffer

/// 6 digits; 00h 00m 00s
pub const MAX_DIGITS: usize = 2 * 3;

/// Digits typed on the keypad, most significant first (HHMMSS read right-aligned)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitBuffer {
    digits: String,
}

impl DigitBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self { digits: String::with_capacity(MAX_DIGITS) }
    }

    /// Append a digit. Returns false when the keystroke was ignored: the buffer
    /// is full, the digit is out of range, or it is a leading zero.
    pub fn type_digit(&mut self, digit: u8) -> bool {
        if digit > 9 || self.is_full() {
            return false;
        }
        if digit == 0 && self.digits.is_empty() {
            return false;
        }
        self.digits.push(char::from(b'0' + digit));
        true
    }

    /// Remove the last digit. Returns false on an empty buffer.
    pub fn delete(&mut self) -> bool {
        self.digits.pop().is_some()
    }

    pub fn reset(&mut self) {
        self.digits.clear();
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.digits.len() >= MAX_DIGITS
    }
}
