//! Echolot Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The ranging logic in `echolot-drivers` only talks
//! to these traits, so it runs unchanged on the STM32F0 board and against
//! the simulated peripherals used in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (echolot-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  echolot-drivers / echolot-core         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  echolot-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ echolot-hal-  │
//!             │   stm32f0     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::ConfigurablePin`] - Digital I/O
//! - [`capture::CaptureUnit`] - 16-bit timer with an input-capture channel
//! - [`clock::MonotonicClock`] - Microsecond time base for deadlines

#![no_std]
#![deny(unsafe_code)]

pub mod capture;
pub mod clock;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use capture::{CaptureConfig, CaptureUnit, Edge, EncodingError, Prescaler};
pub use clock::MonotonicClock;
pub use gpio::{ConfigurablePin, InputPin, OutputPin, PinDirection};
