//! Board-agnostic core logic for the rangefinder firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Capture and display boundary traits
//! - Echo session state machine (pure transition table)
//! - Tick to distance conversion
//! - Display readout layout
//! - Configuration type definitions and validation

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod convert;
pub mod error;
pub mod readout;
pub mod session;
pub mod traits;

pub use config::{ConfigError, RangerConfig};
pub use convert::{ticks_to_centimeters, EchoScale};
pub use error::RangeError;
pub use session::{SessionEvent, SessionState};
