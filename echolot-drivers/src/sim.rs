//! Simulated peripherals for host tests

use core::cell::{Cell, RefCell};
use core::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::vec::Vec;

use echolot_core::traits::capture::{CaptureControl, CaptureHandler};
use echolot_hal::capture::{CaptureUnit, Edge, Prescaler};
use echolot_hal::clock::MonotonicClock;
use echolot_hal::gpio::{ConfigurablePin, OutputPin, PinDirection};
use embedded_hal::delay::DelayNs;

use crate::icu::Icu;

/// Capture unit backed by plain fields
///
/// Edges only latch when they match the selected polarity and the counter
/// clock is running.
#[derive(Debug)]
pub struct SimCaptureUnit {
    pub input_configured: bool,
    pub edge: Edge,
    pub prescaler: Prescaler,
    pub counter: u16,
    pub capture: u16,
    pub interrupt_enabled: bool,
    pub global_interrupts: bool,
    pub pending: bool,
    pub resets: usize,
    /// Polarity selected at each latch
    pub latched: Vec<Edge>,
}

impl SimCaptureUnit {
    pub fn new() -> Self {
        Self {
            input_configured: false,
            edge: Edge::Falling,
            prescaler: Prescaler::Disabled,
            counter: 0,
            capture: 0,
            interrupt_enabled: false,
            global_interrupts: false,
            pending: false,
            resets: 0,
            latched: Vec::new(),
        }
    }

    /// Let `ticks` counter ticks pass
    pub fn advance(&mut self, ticks: u16) {
        if self.prescaler.is_running() {
            self.counter = self.counter.wrapping_add(ticks);
        }
    }

    /// Apply a transition to the capture pin
    ///
    /// Returns true when the capture interrupt would fire.
    pub fn edge_arrives(&mut self, edge: Edge) -> bool {
        if edge != self.edge || !self.prescaler.is_running() {
            return false;
        }
        self.capture = self.counter;
        self.pending = true;
        self.latched.push(edge);
        self.interrupt_enabled && self.global_interrupts
    }
}

impl CaptureUnit for SimCaptureUnit {
    fn configure_input(&mut self) {
        self.input_configured = true;
    }

    fn set_edge(&mut self, edge: Edge) {
        self.edge = edge;
    }

    fn set_prescaler(&mut self, prescaler: Prescaler) {
        self.prescaler = prescaler;
    }

    fn set_counter(&mut self, value: u16) {
        self.counter = value;
    }

    fn capture_value(&self) -> u16 {
        self.capture
    }

    fn set_interrupt(&mut self, enabled: bool) {
        self.interrupt_enabled = enabled;
    }

    fn acknowledge(&mut self) {
        self.pending = false;
    }

    fn enable_interrupts(&mut self) {
        self.global_interrupts = true;
    }

    fn reset(&mut self) {
        self.edge = Edge::Falling;
        self.prescaler = Prescaler::Disabled;
        self.counter = 0;
        self.capture = 0;
        self.interrupt_enabled = false;
        self.pending = false;
        self.resets += 1;
    }
}

/// Feed one edge through the unit and the driver
pub fn fire<'h>(icu: &mut Icu<'h, SimCaptureUnit>, edge: Edge, after_ticks: u16) {
    icu.unit_mut().advance(after_ticks);
    if icu.unit_mut().edge_arrives(edge) {
        icu.on_interrupt();
    }
}

/// Handler that counts notifications
pub struct CountingHandler {
    calls: AtomicUsize,
    last: AtomicU16,
}

impl CountingHandler {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last: AtomicU16::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn last_value(&self) -> u16 {
        self.last.load(Ordering::Relaxed)
    }
}

impl CaptureHandler for CountingHandler {
    fn on_capture(&self, timer: &mut dyn CaptureControl) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.last.store(timer.captured_value(), Ordering::Relaxed);
    }
}

/// What the sensor sends back after a trigger pulse
#[derive(Debug, Clone, Copy)]
pub enum Echo {
    /// Nothing comes back
    Silent,
    /// Echo line rises but never falls
    RisingOnly { delay: u16 },
    /// Full echo pulse
    Pulse { delay: u16, width: u16 },
    /// Full echo pulse followed by spurious edges
    Noisy { delay: u16, width: u16, extra: u8 },
}

/// Trigger pin wired to a simulated sensor
///
/// The falling end of each trigger pulse plays the echo into the capture
/// unit.
pub struct SimTrigger<'a, 'h> {
    icu: &'a RefCell<Icu<'h, SimCaptureUnit>>,
    pub echo: Echo,
    pub direction: PinDirection,
    level: bool,
    /// Every level written, in order
    pub levels: Vec<bool>,
}

impl<'a, 'h> SimTrigger<'a, 'h> {
    pub fn new(icu: &'a RefCell<Icu<'h, SimCaptureUnit>>, echo: Echo) -> Self {
        Self {
            icu,
            echo,
            direction: PinDirection::Input,
            level: false,
            levels: Vec::new(),
        }
    }

    fn play_echo(&self) {
        let mut icu = self.icu.borrow_mut();
        match self.echo {
            Echo::Silent => {}
            Echo::RisingOnly { delay } => fire(&mut icu, Edge::Rising, delay),
            Echo::Pulse { delay, width } => {
                fire(&mut icu, Edge::Rising, delay);
                fire(&mut icu, Edge::Falling, width);
            }
            Echo::Noisy {
                delay,
                width,
                extra,
            } => {
                fire(&mut icu, Edge::Rising, delay);
                fire(&mut icu, Edge::Falling, width);
                for i in 0..extra {
                    let edge = if i % 2 == 0 { Edge::Rising } else { Edge::Falling };
                    fire(&mut icu, edge, 17);
                }
            }
        }
    }
}

impl OutputPin for SimTrigger<'_, '_> {
    fn set_high(&mut self) {
        self.level = true;
        self.levels.push(true);
    }

    fn set_low(&mut self) {
        let falling = self.level && self.direction == PinDirection::Output;
        self.level = false;
        self.levels.push(false);
        if falling {
            self.play_echo();
        }
    }

    fn is_set_high(&self) -> bool {
        self.level
    }
}

impl ConfigurablePin for SimTrigger<'_, '_> {
    fn set_direction(&mut self, direction: PinDirection) {
        self.direction = direction;
    }

    fn direction(&self) -> PinDirection {
        self.direction
    }
}

/// Delay that only adds up the requested time
pub struct SimDelay<'a> {
    elapsed_ns: &'a Cell<u64>,
}

impl<'a> SimDelay<'a> {
    pub fn new(elapsed_ns: &'a Cell<u64>) -> Self {
        Self { elapsed_ns }
    }
}

impl DelayNs for SimDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns.set(self.elapsed_ns.get() + ns as u64);
    }
}

/// Clock that moves forward by a fixed step on every read
pub struct SimClock {
    now: Cell<u64>,
    step: u64,
}

impl SimClock {
    pub fn new(step: u64) -> Self {
        Self {
            now: Cell::new(0),
            step,
        }
    }
}

impl MonotonicClock for SimClock {
    fn now_us(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}
