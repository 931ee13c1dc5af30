//! Input capture unit driver
//!
//! Wraps a register-level [`CaptureUnit`] and adds the driver policy:
//! one registered handler, a software latch of the captured value, and a
//! shutdown after which interrupts change nothing.
//!
//! The interrupt service routine of the board calls [`Icu::on_interrupt`].

use echolot_core::config::ConfigError;
use echolot_core::traits::capture::{CaptureControl, CaptureHandler, CaptureTimer};
use echolot_hal::capture::{CaptureConfig, CaptureUnit, Edge, Prescaler};

/// Input capture unit driver
pub struct Icu<'h, U> {
    unit: U,
    handler: Option<&'h dyn CaptureHandler>,
    edge: Edge,
    prescaler: Prescaler,
    /// Counter value latched at the last capture
    captured: u16,
    active: bool,
}

impl<'h, U: CaptureUnit> Icu<'h, U> {
    /// Wrap a capture unit; nothing is configured until `init`
    pub const fn new(unit: U) -> Self {
        Self {
            unit,
            handler: None,
            edge: Edge::Rising,
            prescaler: Prescaler::Disabled,
            captured: 0,
            active: false,
        }
    }

    /// Initialize from raw edge-select and clock-select encodings
    ///
    /// Unknown encodings are rejected before any register is written.
    pub fn init_raw(&mut self, edge: u8, clock: u8) -> Result<(), ConfigError> {
        let config = CaptureConfig::from_bits(edge, clock)?;
        self.init(config);
        Ok(())
    }

    /// Interrupt service entry point
    pub fn on_interrupt(&mut self) {
        self.unit.acknowledge();
        if !self.active {
            return;
        }

        self.captured = self.unit.capture_value();
        if let Some(handler) = self.handler {
            handler.on_capture(self);
        }
    }

    /// Current clock source
    pub fn prescaler(&self) -> Prescaler {
        self.prescaler
    }

    /// Check if a handler is registered
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Borrow the underlying unit
    pub fn unit(&self) -> &U {
        &self.unit
    }

    /// Mutably borrow the underlying unit
    pub fn unit_mut(&mut self) -> &mut U {
        &mut self.unit
    }

    /// Shut down and give back the unit
    pub fn release(mut self) -> U {
        self.shutdown();
        self.unit
    }
}

impl<U: CaptureUnit> CaptureControl for Icu<'_, U> {
    fn set_edge(&mut self, edge: Edge) {
        self.edge = edge;
        self.unit.set_edge(edge);
    }

    fn edge(&self) -> Edge {
        self.edge
    }

    fn captured_value(&self) -> u16 {
        self.captured
    }

    fn reset_counter(&mut self) {
        self.unit.set_counter(0);
    }

    fn shutdown(&mut self) {
        self.unit.set_interrupt(false);
        self.unit.set_prescaler(Prescaler::Disabled);
        self.unit.reset();
        self.prescaler = Prescaler::Disabled;
        self.captured = 0;
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl<'h, U: CaptureUnit> CaptureTimer<'h> for Icu<'h, U> {
    fn init(&mut self, config: CaptureConfig) {
        self.unit.configure_input();
        self.unit.set_edge(config.edge);
        self.unit.set_prescaler(config.prescaler);
        self.unit.set_counter(0);
        self.captured = 0;
        self.edge = config.edge;
        self.prescaler = config.prescaler;

        // Drop a flag left over from before init
        self.unit.acknowledge();
        self.unit.set_interrupt(true);
        self.unit.enable_interrupts();
        self.active = true;
    }

    fn set_handler(&mut self, handler: Option<&'h dyn CaptureHandler>) {
        self.handler = handler;
    }
}
