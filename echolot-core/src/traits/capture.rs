//! Capture timer driver traits
//!
//! A capture timer notifies exactly one registered [`CaptureHandler`] per
//! latched edge. The handler runs in interrupt context and steers the
//! timer through the [`CaptureControl`] view it is handed.

use core::cell::RefCell;

use echolot_hal::capture::{CaptureConfig, Edge};

/// Operations available while handling a capture
pub trait CaptureControl {
    /// Select the edge that latches the next capture, effective immediately
    fn set_edge(&mut self, edge: Edge);

    /// Currently selected edge
    fn edge(&self) -> Edge;

    /// Counter value latched by the most recent capture
    ///
    /// Stable until the next capture.
    fn captured_value(&self) -> u16;

    /// Zero the free-running counter
    ///
    /// The last captured value is left as is.
    fn reset_counter(&mut self);

    /// Stop the clock, disable the capture interrupt, and zero the
    /// driver-owned registers
    ///
    /// Calling it again has no further effect.
    fn shutdown(&mut self);

    /// Check if the timer is initialized and not shut down
    fn is_active(&self) -> bool;
}

/// Receiver of capture notifications
///
/// Called from the capture interrupt, so implementations must be `Sync`
/// and must not block.
pub trait CaptureHandler: Sync {
    /// Handle one latched edge
    fn on_capture(&self, timer: &mut dyn CaptureControl);
}

/// Capture timer with a single registered handler
pub trait CaptureTimer<'h>: CaptureControl {
    /// Configure the input pin, edge and clock, zero the counter and the
    /// last captured value, and enable capture interrupts
    fn init(&mut self, config: CaptureConfig);

    /// Replace the registered handler
    ///
    /// `None` stops notification delivery but leaves the timer running.
    fn set_handler(&mut self, handler: Option<&'h dyn CaptureHandler>);
}

/// Capture timer shared between the mainline and the capture interrupt
///
/// Access is scoped: the timer is only reachable inside `with_timer`, which
/// the firmware backs with a critical section and tests back with a
/// `RefCell`.
pub trait SharedCaptureTimer<'h> {
    /// Run `f` with exclusive access to the timer
    ///
    /// Returns `None` when no timer has been installed yet.
    fn with_timer<R>(&self, f: impl FnOnce(&mut dyn CaptureTimer<'h>) -> R) -> Option<R>;
}

/// Single-context sharing, used when the interrupt is simulated
impl<'h, T: CaptureTimer<'h>> SharedCaptureTimer<'h> for RefCell<T> {
    fn with_timer<R>(&self, f: impl FnOnce(&mut dyn CaptureTimer<'h>) -> R) -> Option<R> {
        Some(f(&mut *self.borrow_mut()))
    }
}
