//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in echolot-core:
//!
//! - Capture timer driver over any `echolot_hal::CaptureUnit`
//! - Ultrasonic ranger (HC-SR04 style trigger/echo)
//! - HD44780 character LCD in 4-bit mode

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod icu;
pub mod lcd;
pub mod ultrasonic;

#[cfg(test)]
mod sim;

pub use icu::Icu;
pub use lcd::Hd44780;
pub use ultrasonic::{EchoSession, Ultrasonic};
