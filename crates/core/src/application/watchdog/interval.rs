//! Ping interval derivation
//!
//! The supervisor declares its own timeout in microseconds; pinging at
//! exactly that cadence risks losing the race against scheduler jitter.
//! Halving the timeout guarantees at least one successful ping lands
//! inside the supervisor's window even if a tick is delayed or skipped.

use crate::domain::SupervisionContext;
use std::time::Duration;

const USEC_PER_SEC: f64 = 1_000_000.0;

/// Internal tick period for a supervisor timeout of `timeout_usec`.
pub fn tick_interval(timeout_usec: u64) -> Duration {
    Duration::from_secs_f64(timeout_usec as f64 / 2.0 / USEC_PER_SEC)
}

/// Tick period for a supervision context, `None` when monitoring is disabled.
pub fn ping_interval(context: &SupervisionContext) -> Option<Duration> {
    context.watchdog_timeout_usec().map(tick_interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_the_supervisor_timeout() {
        assert_eq!(tick_interval(2_000_000), Duration::from_secs(1));
        assert_eq!(tick_interval(10_000_000), Duration::from_secs(5));
        assert_eq!(tick_interval(3_000_000), Duration::from_millis(1500));
    }

    #[test]
    fn sub_second_timeouts_stay_exact() {
        assert_eq!(tick_interval(1_000_000), Duration::from_millis(500));
        assert_eq!(tick_interval(500_000), Duration::from_millis(250));
    }

    #[test]
    fn matches_formula_for_a_range_of_timeouts() {
        for timeout_usec in [1u64, 7, 999, 1_000_000, 2_000_000, 60_000_000] {
            let expected = Duration::from_secs_f64(timeout_usec as f64 / 2_000_000.0);
            assert_eq!(tick_interval(timeout_usec), expected);
        }
    }

    #[test]
    fn disabled_context_yields_no_interval() {
        assert_eq!(ping_interval(&SupervisionContext::disabled()), None);
    }

    #[test]
    fn enabled_context_yields_half_timeout() {
        let ctx = SupervisionContext::with_timeout_usec(2_000_000);
        assert_eq!(ping_interval(&ctx), Some(Duration::from_secs(1)));
    }
}
