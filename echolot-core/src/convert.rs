//! Echo pulse width to distance conversion
//!
//! The echo pulse lasts for the sound's round trip, so one centimeter of
//! range costs two centimeters of travel. The HC-SR04 datasheet rounds this
//! to 58 us per centimeter.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use echolot_hal::capture::Prescaler;

/// CPU clock of the reference board (Hz)
pub const REFERENCE_CPU_HZ: u32 = 8_000_000;

/// Datasheet round-trip time per centimeter (ns)
pub const DATASHEET_NS_PER_CM: u32 = 58_000;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Convert a pulse width in counter ticks to whole centimeters
///
/// Assumes the reference 8 MHz clock and the datasheet scale; at /8 this is
/// `ticks / 58`, truncated. A stopped counter never measures anything, so
/// `Prescaler::Disabled` yields 0.
pub fn ticks_to_centimeters(ticks: u16, prescaler: Prescaler) -> u16 {
    EchoScale::reference(prescaler).centimeters(ticks)
}

/// Tick to distance scale for one clock setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EchoScale {
    /// CPU clock feeding the prescaler (Hz)
    pub cpu_hz: u32,
    /// Counter clock divider
    pub prescaler: Prescaler,
    /// Round-trip time per centimeter (ns)
    pub ns_per_cm: u32,
}

impl EchoScale {
    pub const fn new(cpu_hz: u32, prescaler: Prescaler, ns_per_cm: u32) -> Self {
        Self {
            cpu_hz,
            prescaler,
            ns_per_cm,
        }
    }

    /// Reference board clock with the datasheet scale
    pub const fn reference(prescaler: Prescaler) -> Self {
        Self::new(REFERENCE_CPU_HZ, prescaler, DATASHEET_NS_PER_CM)
    }

    /// Round-trip time per centimeter for a given speed of sound (m/s)
    ///
    /// 343 m/s (dry air, 20 °C) gives 58_309 ns.
    pub const fn ns_per_cm_for(speed_m_s: u32) -> u32 {
        if speed_m_s == 0 {
            return 0;
        }
        // 2 cm of travel = 0.02 m; 0.02 / v seconds = 2e7 / v ns
        20_000_000 / speed_m_s
    }

    /// Distance in whole centimeters, saturating at `u16::MAX`
    pub fn centimeters(&self, ticks: u16) -> u16 {
        let Some(divisor) = self.prescaler.divisor() else {
            return 0;
        };
        if self.cpu_hz == 0 || self.ns_per_cm == 0 {
            return 0;
        }

        // Single division keeps the truncation identical to ticks / 58
        let numerator = ticks as u64 * divisor as u64 * NANOS_PER_SECOND;
        let denominator = self.cpu_hz as u64 * self.ns_per_cm as u64;
        (numerator / denominator).min(u16::MAX as u64) as u16
    }
}
