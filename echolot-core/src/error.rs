//! Ranging errors

use crate::config::ConfigError;

/// Failure of a single measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    /// Echo did not complete before the deadline
    Timeout,
    /// Measurement requested without arming a session first
    NotArmed,
    /// No capture timer installed
    TimerUnavailable,
    /// Ranger configuration rejected
    Config(ConfigError),
}

impl From<ConfigError> for RangeError {
    fn from(err: ConfigError) -> Self {
        RangeError::Config(err)
    }
}
