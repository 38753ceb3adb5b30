//! Attempt accounting for the chat driver.
//!
//! # Rules
//! - Rate-limited and failed attempts each consume one slot
//! - A re-authentication retries the same slot
//! - Re-authentications in a row are capped; any consumed slot resets the run

/// Tracks attempt slots and consecutive re-authentications.
#[derive(Debug, Clone)]
pub struct RetryBudget {
    max_attempts: u32,
    max_consecutive_reauths: u32,
    attempt: u32,
    consecutive_reauths: u32,
}

impl RetryBudget {
    pub fn new(max_attempts: u32, max_consecutive_reauths: u32) -> Self {
        Self {
            max_attempts,
            max_consecutive_reauths,
            attempt: 0,
            consecutive_reauths: 0,
        }
    }

    /// Zero-based index of the current slot.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn has_attempts(&self) -> bool {
        self.attempt < self.max_attempts
    }

    /// Whether the current slot is the final one.
    pub fn is_last(&self) -> bool {
        self.attempt + 1 >= self.max_attempts
    }

    /// Use up the current slot.
    pub fn consume(&mut self) {
        self.attempt += 1;
        self.consecutive_reauths = 0;
    }

    /// Record a re-authentication; false once the cap is reached.
    pub fn try_reauth(&mut self) -> bool {
        if self.consecutive_reauths >= self.max_consecutive_reauths {
            return false;
        }
        self.consecutive_reauths += 1;
        true
    }
}
