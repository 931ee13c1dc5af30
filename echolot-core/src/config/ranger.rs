//! Ranging configuration and validation

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use echolot_hal::capture::{CaptureConfig, Edge, EncodingError, Prescaler};

use crate::convert::{EchoScale, DATASHEET_NS_PER_CM, REFERENCE_CPU_HZ};

/// Ticks in one wrap of the 16-bit capture counter
pub const COUNTER_SPAN_TICKS: u64 = 1 << 16;

/// Datasheet minimum trigger pulse width
pub const MIN_TRIGGER_PULSE_US: u32 = 10;

/// Configuration rejected before any hardware is touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Edge-select encoding not recognized
    UnknownEdge(u8),
    /// Clock-select encoding not recognized
    UnknownPrescaler(u8),
    /// CPU clock of 0 Hz
    ZeroCpuClock,
    /// Trigger pulse of 0 us
    ZeroTriggerPulse,
    /// Round-trip time per centimeter of 0 ns
    ZeroEchoScale,
    /// Ranging needs a running counter
    PrescalerDisabled,
    /// Echo deadline is longer than one counter wrap
    TimeoutExceedsCounterSpan {
        /// Configured deadline
        timeout_us: u32,
        /// Counter wrap period at the configured clock
        span_us: u64,
    },
}

impl From<EncodingError> for ConfigError {
    fn from(err: EncodingError) -> Self {
        match err {
            EncodingError::Edge(bits) => ConfigError::UnknownEdge(bits),
            EncodingError::Prescaler(bits) => ConfigError::UnknownPrescaler(bits),
        }
    }
}

/// Rangefinder configuration
///
/// Defaults match the reference board: 8 MHz CPU clock, counter at /8
/// (one tick per microsecond), 10 us trigger pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangerConfig {
    /// CPU clock feeding the capture timer prescaler (Hz)
    pub cpu_hz: u32,
    /// Capture counter clock source
    pub prescaler: Prescaler,
    /// Echo round-trip time per centimeter (ns)
    pub ns_per_cm: u32,
    /// Trigger pulse width (us)
    pub trigger_pulse_us: u32,
    /// Give up on an echo after this long; `None` waits forever
    pub echo_timeout_us: Option<u32>,
    /// Time between measurements (ms)
    pub cycle_ms: u32,
}

impl Default for RangerConfig {
    fn default() -> Self {
        Self {
            cpu_hz: REFERENCE_CPU_HZ,
            prescaler: Prescaler::Div8,
            ns_per_cm: DATASHEET_NS_PER_CM,
            trigger_pulse_us: MIN_TRIGGER_PULSE_US,
            echo_timeout_us: Some(50_000),
            cycle_ms: 60,
        }
    }
}

impl RangerConfig {
    /// Capture timer setup for a ranging session
    ///
    /// Sessions always start on the rising edge of the echo pulse.
    pub const fn capture_config(&self) -> CaptureConfig {
        CaptureConfig::new(Edge::Rising, self.prescaler)
    }

    /// Tick to distance scale for this configuration
    pub const fn scale(&self) -> EchoScale {
        EchoScale::new(self.cpu_hz, self.prescaler, self.ns_per_cm)
    }

    /// Period of one 16-bit counter wrap in microseconds
    ///
    /// `None` when the counter is stopped or the CPU clock is zero.
    pub fn counter_span_us(&self) -> Option<u64> {
        let divisor = self.prescaler.divisor()? as u64;
        if self.cpu_hz == 0 {
            return None;
        }
        Some(COUNTER_SPAN_TICKS * divisor * 1_000_000 / self.cpu_hz as u64)
    }

    /// Check the configuration for values the ranger cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cpu_hz == 0 {
            return Err(ConfigError::ZeroCpuClock);
        }
        if self.trigger_pulse_us == 0 {
            return Err(ConfigError::ZeroTriggerPulse);
        }
        if self.ns_per_cm == 0 {
            return Err(ConfigError::ZeroEchoScale);
        }
        let span_us = self
            .counter_span_us()
            .ok_or(ConfigError::PrescalerDisabled)?;

        // A longer deadline would let the counter wrap and alias the width
        if let Some(timeout_us) = self.echo_timeout_us {
            if timeout_us as u64 > span_us {
                return Err(ConfigError::TimeoutExceedsCounterSpan { timeout_us, span_us });
            }
        }

        Ok(())
    }
}
