//! Monotonic time base
//!
//! Used for deadlines only. Pulse widths are measured by the capture unit,
//! never by this clock.

/// Free-running microsecond clock
pub trait MonotonicClock {
    /// Microseconds since an arbitrary epoch; never decreases
    fn now_us(&self) -> u64;

    /// Deadline `timeout_us` from now
    fn deadline_after(&self, timeout_us: u32) -> u64 {
        self.now_us().saturating_add(timeout_us as u64)
    }

    /// Check whether `deadline` has passed
    fn is_past(&self, deadline: u64) -> bool {
        self.now_us() >= deadline
    }
}
