//! Monotonic clock on the embassy time driver

use echolot_hal::clock::MonotonicClock;
use embassy_time::Instant;

/// Microsecond clock backed by `embassy_time::Instant`
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
