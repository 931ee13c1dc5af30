//! Ultrasonic ranger (HC-SR04 style)
//!
//! A 10 us pulse on the trigger line starts a measurement. The sensor then
//! holds its echo line high for the sound's round trip. The echo line is
//! wired to a capture input; [`EchoSession`] is registered as the capture
//! handler and times the pulse in two steps:
//!
//! 1. Rising edge: zero the counter, switch the capture to the falling edge
//! 2. Falling edge: latch the counter as the pulse width, shut the timer down
//!
//! [`Ultrasonic`] issues the trigger and waits for the session to complete.

use core::hint::spin_loop;

use embedded_hal::delay::DelayNs;
use portable_atomic::{AtomicU16, AtomicU32, AtomicU8, Ordering};

use echolot_core::config::{ConfigError, RangerConfig};
use echolot_core::error::RangeError;
use echolot_core::session::{SessionEvent, SessionState};
use echolot_core::traits::capture::{CaptureControl, CaptureHandler, SharedCaptureTimer};
use echolot_hal::capture::Edge;
use echolot_hal::clock::MonotonicClock;
use echolot_hal::gpio::{ConfigurablePin, OutputPin, PinDirection};

/// One echo measurement, shared between the mainline and the capture
/// interrupt
///
/// The interrupt side only moves `AwaitingRising -> AwaitingFalling ->
/// Complete` and is the only writer of the pulse width. The width is stored
/// before `Complete` is published with release ordering.
pub struct EchoSession {
    state: AtomicU8,
    ticks: AtomicU16,
    completions: AtomicU32,
}

impl Default for EchoSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EchoSession {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(SessionState::Idle as u8),
            ticks: AtomicU16::new(0),
            completions: AtomicU32::new(0),
        }
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        SessionState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Edge phase counter (0 or 1)
    pub fn phase(&self) -> u8 {
        self.state().phase()
    }

    /// Check if a pulse width is ready to read
    pub fn is_complete(&self) -> bool {
        self.state() == SessionState::Complete
    }

    /// Number of sessions completed since construction
    pub fn completions(&self) -> u32 {
        self.completions.load(Ordering::Relaxed)
    }

    /// Start a fresh session, dropping any progress
    pub fn arm(&self) {
        self.apply(SessionEvent::Arm);
    }

    /// Mark the trigger pulse as issued
    ///
    /// Returns false unless the session was armed.
    pub fn trigger(&self) -> bool {
        self.apply(SessionEvent::Trigger).is_some()
    }

    /// Take a completed pulse width, returning the session to idle
    pub fn take(&self) -> Option<u16> {
        self.apply(SessionEvent::Consume)?;
        Some(self.ticks.load(Ordering::Relaxed))
    }

    /// Give up on an in-flight session
    ///
    /// Returns false if there was nothing to abandon, including when the
    /// session completed in the meantime.
    pub fn abandon(&self) -> bool {
        self.apply(SessionEvent::Abandon).is_some()
    }

    /// Apply a mainline event
    ///
    /// Returns the state left behind, or `None` when the event does not
    /// apply. Compare-and-exchange keeps a concurrent interrupt transition
    /// from being overwritten.
    fn apply(&self, event: SessionEvent) -> Option<SessionState> {
        let mut current = self.state();
        loop {
            let next = current.transition(event);
            if next == current && event != SessionEvent::Arm {
                return None;
            }
            match self.state.compare_exchange_weak(
                current.as_u8(),
                next.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Some(current),
                Err(actual) => current = SessionState::from_u8(actual),
            }
        }
    }

    /// Publish an edge transition from interrupt context
    fn advance(&self, from: SessionState) -> bool {
        let to = from.transition(SessionEvent::Edge);
        self.state
            .compare_exchange(from.as_u8(), to.as_u8(), Ordering::Release, Ordering::Relaxed)
            .is_ok()
    }
}

impl CaptureHandler for EchoSession {
    fn on_capture(&self, timer: &mut dyn CaptureControl) {
        let state = self.state();
        if !state.accepts_edge() {
            #[cfg(feature = "defmt")]
            defmt::trace!("capture ignored in {}", state);
            return;
        }

        match state {
            SessionState::AwaitingRising => {
                timer.reset_counter();
                timer.set_edge(Edge::Falling);
                self.advance(SessionState::AwaitingRising);
            }
            SessionState::AwaitingFalling => {
                self.ticks.store(timer.captured_value(), Ordering::Relaxed);
                if self.advance(SessionState::AwaitingFalling) {
                    self.completions.fetch_add(1, Ordering::Relaxed);
                }
                timer.shutdown();
            }
            _ => {}
        }
    }
}

/// Ultrasonic ranger
///
/// Owns the trigger pin and a delay for the trigger pulse. The capture timer
/// is shared with its interrupt and only borrowed for the duration of each
/// access.
pub struct Ultrasonic<'a, T, P, D, C> {
    session: &'a EchoSession,
    timer: &'a T,
    trigger: P,
    delay: D,
    clock: C,
    config: RangerConfig,
}

impl<'a, T, P, D, C> Ultrasonic<'a, T, P, D, C>
where
    T: SharedCaptureTimer<'a>,
    P: OutputPin + ConfigurablePin,
    D: DelayNs,
    C: MonotonicClock,
{
    /// Create a ranger
    ///
    /// # Arguments
    /// - `session`: Session shared with the capture interrupt
    /// - `timer`: Capture timer wired to the echo line
    /// - `trigger`: Pin wired to the sensor's trigger input
    /// - `delay`: Delay used for the trigger pulse
    /// - `clock`: Time base for the echo deadline
    /// - `config`: Validated here
    pub fn new(
        session: &'a EchoSession,
        timer: &'a T,
        trigger: P,
        delay: D,
        clock: C,
        config: RangerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            session,
            timer,
            trigger,
            delay,
            clock,
            config,
        })
    }

    /// Arm a fresh session
    ///
    /// Sets up the capture timer for the rising edge, registers the session
    /// as its handler, and drives the trigger line low. Progress of an
    /// earlier session is dropped.
    pub fn initialize(&mut self) -> Result<(), RangeError> {
        let session = self.session;
        let capture = self.config.capture_config();

        let installed = self.timer.with_timer(|timer| {
            session.arm();
            timer.init(capture);
            timer.set_handler(Some(session));
        });
        if installed.is_none() {
            session.abandon();
            return Err(RangeError::TimerUnavailable);
        }

        self.trigger.set_direction(PinDirection::Output);
        self.trigger.set_low();
        Ok(())
    }

    /// Drive the trigger line high for the configured pulse width
    pub fn trigger_pulse(&mut self) {
        self.trigger.set_high();
        self.delay.delay_us(self.config.trigger_pulse_us);
        self.trigger.set_low();
    }

    /// Trigger and wait for the echo pulse width in counter ticks
    pub fn read_ticks(&mut self) -> Result<u16, RangeError> {
        match self.timer.with_timer(|timer| timer.is_active()) {
            None => return Err(RangeError::TimerUnavailable),
            Some(false) => {
                self.session.abandon();
                return Err(RangeError::NotArmed);
            }
            Some(true) => {}
        }
        if !self.session.trigger() {
            return Err(RangeError::NotArmed);
        }
        self.trigger_pulse();

        let deadline = self
            .config
            .echo_timeout_us
            .map(|timeout_us| self.clock.deadline_after(timeout_us));

        loop {
            match self.session.state() {
                SessionState::Complete => {
                    if let Some(ticks) = self.session.take() {
                        return Ok(ticks);
                    }
                }
                state if !state.is_in_flight() => return Err(RangeError::NotArmed),
                _ => {}
            }

            if let Some(deadline) = deadline {
                // A session that completes right at the deadline is still read
                if self.clock.is_past(deadline) && self.session.abandon() {
                    self.timer.with_timer(|timer| timer.shutdown());
                    #[cfg(feature = "defmt")]
                    defmt::warn!(
                        "no echo within {=u32} us",
                        self.config.echo_timeout_us.unwrap_or_default()
                    );
                    return Err(RangeError::Timeout);
                }
            }

            spin_loop();
        }
    }

    /// Trigger and wait for the distance in centimeters
    pub fn read_distance(&mut self) -> Result<u16, RangeError> {
        let ticks = self.read_ticks()?;
        Ok(self.config.scale().centimeters(ticks))
    }

    /// Arm a session and read one distance
    pub fn measure(&mut self) -> Result<u16, RangeError> {
        self.initialize()?;
        self.read_distance()
    }

    /// Session shared with the capture interrupt
    pub fn session(&self) -> &'a EchoSession {
        self.session
    }

    /// Active configuration
    pub fn config(&self) -> &RangerConfig {
        &self.config
    }

    /// Give back the owned peripherals
    pub fn release(self) -> (P, D, C) {
        (self.trigger, self.delay, self.clock)
    }
}
