//! Exponential backoff for rate-limited chat attempts.

use std::time::Duration;

/// Delay after a rate-limited attempt: `unit * 2^attempt`.
///
/// `attempt` is zero-based, so the first retry waits one unit. Saturates
/// instead of overflowing.
pub fn rate_limit_delay(attempt: u32, unit: Duration) -> Duration {
    let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
    unit.saturating_mul(factor)
}

/// Whole milliseconds as `u64`, saturating for log fields.
pub fn millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_doubles_per_attempt() {
        let unit = Duration::from_secs(1);
        let delays: Vec<u64> = (0..5)
            .map(|i| rate_limit_delay(i, unit).as_secs())
            .collect();
        assert_eq!(delays, vec![1, 2, 4, 8, 16]);
    }

    #[test]
    fn test_delay_scales_with_unit() {
        assert_eq!(
            rate_limit_delay(3, Duration::from_millis(10)),
            Duration::from_millis(80)
        );
    }

    #[test]
    fn test_delay_saturates() {
        let delay = rate_limit_delay(64, Duration::from_secs(1));
        assert_eq!(delay, Duration::from_secs(u32::MAX as u64));
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }
}
