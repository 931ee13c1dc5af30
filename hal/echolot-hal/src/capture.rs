//! Input-capture timer abstractions
//!
//! An input-capture unit latches the value of a free-running 16-bit counter
//! into a capture register at the instant a selected edge appears on its
//! input pin, and can raise an interrupt when it does.
//!
//! [`CaptureUnit`] is the register-level facade a chip HAL implements. The
//! policy on top of it (handler registration, latching, shutdown) lives in
//! `echolot-drivers::icu`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Signal transition that triggers a capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Edge {
    /// High to low
    Falling,
    /// Low to high
    Rising,
}

impl Edge {
    /// Value of the edge-select bit
    pub const fn bits(self) -> u8 {
        match self {
            Edge::Falling => 0,
            Edge::Rising => 1,
        }
    }

    /// Decode an edge-select bit
    pub const fn from_bits(bits: u8) -> Result<Self, EncodingError> {
        match bits {
            0 => Ok(Edge::Falling),
            1 => Ok(Edge::Rising),
            other => Err(EncodingError::Edge(other)),
        }
    }

    /// The opposite transition
    pub const fn opposite(self) -> Self {
        match self {
            Edge::Falling => Edge::Rising,
            Edge::Rising => Edge::Falling,
        }
    }
}

/// Counter clock source
///
/// Each variant divides the CPU clock; `Disabled` stops the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Prescaler {
    Disabled,
    Div1,
    #[default]
    Div8,
    Div64,
    Div256,
    Div1024,
}

impl Prescaler {
    /// Every prescaler setting, in clock-select order
    pub const ALL: [Prescaler; 6] = [
        Prescaler::Disabled,
        Prescaler::Div1,
        Prescaler::Div8,
        Prescaler::Div64,
        Prescaler::Div256,
        Prescaler::Div1024,
    ];

    /// CPU cycles per counter tick, `None` when the clock is stopped
    pub const fn divisor(self) -> Option<u32> {
        match self {
            Prescaler::Disabled => None,
            Prescaler::Div1 => Some(1),
            Prescaler::Div8 => Some(8),
            Prescaler::Div64 => Some(64),
            Prescaler::Div256 => Some(256),
            Prescaler::Div1024 => Some(1024),
        }
    }

    /// Value of the 3-bit clock-select field
    pub const fn bits(self) -> u8 {
        match self {
            Prescaler::Disabled => 0,
            Prescaler::Div1 => 1,
            Prescaler::Div8 => 2,
            Prescaler::Div64 => 3,
            Prescaler::Div256 => 4,
            Prescaler::Div1024 => 5,
        }
    }

    /// Decode a clock-select field
    ///
    /// Values 6 and 7 select external clock sources on some parts; they are
    /// not supported here.
    pub const fn from_bits(bits: u8) -> Result<Self, EncodingError> {
        match bits {
            0 => Ok(Prescaler::Disabled),
            1 => Ok(Prescaler::Div1),
            2 => Ok(Prescaler::Div8),
            3 => Ok(Prescaler::Div64),
            4 => Ok(Prescaler::Div256),
            5 => Ok(Prescaler::Div1024),
            other => Err(EncodingError::Prescaler(other)),
        }
    }

    /// Whether the counter advances with this setting
    pub const fn is_running(self) -> bool {
        !matches!(self, Prescaler::Disabled)
    }
}

/// Unknown register encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodingError {
    /// Edge-select value other than 0 or 1
    Edge(u8),
    /// Clock-select value outside 0..=5
    Prescaler(u8),
}

/// Capture timer configuration
///
/// Immutable once handed to the driver's `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CaptureConfig {
    /// Edge that triggers the first capture
    pub edge: Edge,
    /// Counter clock source
    pub prescaler: Prescaler,
}

impl CaptureConfig {
    /// Create a config
    pub const fn new(edge: Edge, prescaler: Prescaler) -> Self {
        Self { edge, prescaler }
    }

    /// Decode a config from raw edge-select and clock-select values
    pub const fn from_bits(edge: u8, prescaler: u8) -> Result<Self, EncodingError> {
        let edge = match Edge::from_bits(edge) {
            Ok(edge) => edge,
            Err(e) => return Err(e),
        };
        let prescaler = match Prescaler::from_bits(prescaler) {
            Ok(prescaler) => prescaler,
            Err(e) => return Err(e),
        };
        Ok(Self { edge, prescaler })
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            edge: Edge::Rising,
            prescaler: Prescaler::Div8,
        }
    }
}

/// 16-bit timer with one input-capture channel
///
/// Register-level facade. Implementations touch hardware only; they keep no
/// policy of their own.
pub trait CaptureUnit {
    /// Route the capture pin to the timer as a digital input
    fn configure_input(&mut self);

    /// Select the edge that latches the next capture
    fn set_edge(&mut self, edge: Edge);

    /// Select the counter clock; `Prescaler::Disabled` stops the counter
    fn set_prescaler(&mut self, prescaler: Prescaler);

    /// Load the free-running counter
    fn set_counter(&mut self, value: u16);

    /// Value latched by the most recent capture
    fn capture_value(&self) -> u16;

    /// Enable or disable the capture interrupt
    fn set_interrupt(&mut self, enabled: bool);

    /// Clear the pending capture flag
    fn acknowledge(&mut self);

    /// Allow interrupt delivery to the core
    fn enable_interrupts(&mut self);

    /// Return every control register to its power-on state
    ///
    /// Stops the counter clock and disables the capture interrupt.
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prescaler_bits_roundtrip() {
        for prescaler in Prescaler::ALL {
            assert_eq!(Prescaler::from_bits(prescaler.bits()), Ok(prescaler));
        }
        assert_eq!(Prescaler::from_bits(6), Err(EncodingError::Prescaler(6)));
        assert_eq!(Prescaler::from_bits(0xFF), Err(EncodingError::Prescaler(0xFF)));
    }

    #[test]
    fn test_prescaler_divisor() {
        assert_eq!(Prescaler::Disabled.divisor(), None);
        assert_eq!(Prescaler::Div8.divisor(), Some(8));
        assert_eq!(Prescaler::Div1024.divisor(), Some(1024));
        assert!(!Prescaler::Disabled.is_running());
        assert!(Prescaler::Div1.is_running());
    }

    #[test]
    fn test_edge_bits() {
        assert_eq!(Edge::from_bits(0), Ok(Edge::Falling));
        assert_eq!(Edge::from_bits(1), Ok(Edge::Rising));
        assert_eq!(Edge::from_bits(2), Err(EncodingError::Edge(2)));
        assert_eq!(Edge::Rising.opposite(), Edge::Falling);
    }

    #[test]
    fn test_config_from_bits() {
        let config = CaptureConfig::from_bits(1, 2).unwrap();
        assert_eq!(config, CaptureConfig::new(Edge::Rising, Prescaler::Div8));
        assert_eq!(config, CaptureConfig::default());

        assert_eq!(
            CaptureConfig::from_bits(3, 2),
            Err(EncodingError::Edge(3))
        );
        assert_eq!(
            CaptureConfig::from_bits(0, 7),
            Err(EncodingError::Prescaler(7))
        );
    }
}
