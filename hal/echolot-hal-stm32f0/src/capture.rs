//! Input capture on a general-purpose STM32 timer
//!
//! Channel 1 of the timer runs as a free-running 16-bit counter whose value
//! is latched into CCR1 on the selected edge. The counter clock is the
//! timer kernel clock divided by the prescaler; on the reference board the
//! timer runs from the 8 MHz HSI, so the divisors match the reference
//! clock-select settings one to one.

use echolot_hal::capture::{CaptureUnit, Edge, Prescaler};
use embassy_stm32::interrupt::typelevel::Interrupt;
use embassy_stm32::timer::low_level::{InputCaptureMode, InputTISelection, Timer};
use embassy_stm32::timer::{Channel, GeneralInstance4Channel};

const CHANNEL: Channel = Channel::Ch1;

/// Capture unit on channel 1 of timer `T`
///
/// `PIN` keeps the capture pin's alternate function claimed for as long as
/// the unit exists.
pub struct TimerCapture<'d, T: GeneralInstance4Channel, PIN> {
    timer: Timer<'d, T>,
    _pin: PIN,
}

impl<'d, T: GeneralInstance4Channel, PIN> TimerCapture<'d, T, PIN> {
    /// Wrap a timer and its configured capture pin
    pub fn new(timer: Timer<'d, T>, pin: PIN) -> Self {
        timer.stop();
        Self { timer, _pin: pin }
    }
}

impl<T: GeneralInstance4Channel, PIN> CaptureUnit for TimerCapture<'_, T, PIN> {
    fn configure_input(&mut self) {
        // Free-running over the full 16-bit range
        self.timer.regs_core().arr().write(|w| w.set_arr(u16::MAX));
        self.timer
            .set_input_ti_selection(CHANNEL, InputTISelection::Normal);
        self.timer.enable_channel(CHANNEL, true);
    }

    fn set_edge(&mut self, edge: Edge) {
        let mode = match edge {
            Edge::Rising => InputCaptureMode::Rising,
            Edge::Falling => InputCaptureMode::Falling,
        };
        self.timer.set_input_capture_mode(CHANNEL, mode);
    }

    fn set_prescaler(&mut self, prescaler: Prescaler) {
        match prescaler.divisor() {
            Some(divisor) => {
                let regs = self.timer.regs_core();
                regs.psc().write_value((divisor - 1) as u16);
                // Load the prescaler now instead of at the next overflow
                regs.egr().write(|w| w.set_ug(true));
                self.timer.start();
            }
            None => self.timer.stop(),
        }
    }

    fn set_counter(&mut self, value: u16) {
        self.timer.regs_core().cnt().write(|w| w.set_cnt(value));
    }

    fn capture_value(&self) -> u16 {
        self.timer.get_capture_value(CHANNEL) as u16
    }

    fn set_interrupt(&mut self, enabled: bool) {
        self.timer.enable_input_interrupt(CHANNEL, enabled);
    }

    fn acknowledge(&mut self) {
        self.timer.clear_input_interrupt(CHANNEL);
    }

    fn enable_interrupts(&mut self) {
        T::CaptureCompareInterrupt::unpend();
        // SAFETY: the firmware installs the handler for this vector
        unsafe { T::CaptureCompareInterrupt::enable() };
    }

    fn reset(&mut self) {
        self.timer.stop();
        self.timer.enable_input_interrupt(CHANNEL, false);
        self.timer.enable_channel(CHANNEL, false);
        self.timer.set_input_capture_mode(CHANNEL, InputCaptureMode::Falling);
        let regs = self.timer.regs_core();
        regs.psc().write_value(0);
        regs.cnt().write(|w| w.set_cnt(0));
        self.timer.clear_input_interrupt(CHANNEL);
    }
}
