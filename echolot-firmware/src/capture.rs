//! Echo capture timer shared with the TIM3 interrupt

use core::cell::RefCell;

use echolot_core::traits::capture::{CaptureTimer, SharedCaptureTimer};
use echolot_drivers::{EchoSession, Icu};
use echolot_hal_stm32f0::TimerCapture;
use embassy_stm32::peripherals::TIM3;
use embassy_stm32::timer::input_capture::CapturePin;
use embassy_stm32::timer::Ch1;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// TIM3 channel 1 with its PA6 capture pin
pub type EchoUnit = TimerCapture<'static, TIM3, CapturePin<'static, TIM3, Ch1>>;

/// Capture driver for the echo line
pub type EchoIcu = Icu<'static, EchoUnit>;

/// Session handed to the capture interrupt
pub static ECHO_SESSION: EchoSession = EchoSession::new();

/// Capture driver, installed once peripherals are up
pub static ECHO_ICU: IcuSlot = IcuSlot::new();

/// Capture driver slot guarded by a critical section
pub struct IcuSlot(Mutex<CriticalSectionRawMutex, RefCell<Option<EchoIcu>>>);

impl IcuSlot {
    pub const fn new() -> Self {
        Self(Mutex::new(RefCell::new(None)))
    }

    /// Put the driver in place, replacing any earlier one
    pub fn install(&self, icu: EchoIcu) {
        self.0.lock(|cell| {
            cell.replace(Some(icu));
        });
    }

    /// Interrupt service entry
    pub fn on_interrupt(&self) {
        self.0.lock(|cell| {
            if let Some(icu) = cell.borrow_mut().as_mut() {
                icu.on_interrupt();
            }
        });
    }
}

impl SharedCaptureTimer<'static> for IcuSlot {
    fn with_timer<R>(
        &self,
        f: impl FnOnce(&mut dyn CaptureTimer<'static>) -> R,
    ) -> Option<R> {
        self.0.lock(|cell| {
            let mut slot = cell.borrow_mut();
            let icu: &mut dyn CaptureTimer<'static> = slot.as_mut()?;
            Some(f(icu))
        })
    }
}
