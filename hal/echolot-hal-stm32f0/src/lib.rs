//! STM32F0-specific HAL for the Echolot firmware
//!
//! This crate implements the `echolot-hal` traits on top of embassy-stm32
//! for STM32F0 chips:
//!
//! - STM32F042K6 (reference board)
//! - STM32F042F6
//!
//! # Features
//!
//! - `stm32f042k6` - Enable support for STM32F042K6T6
//! - `stm32f042f6` - Enable support for STM32F042F6P6
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! The firmware takes peripherals from `embassy_stm32::init`, wraps them in
//! the types below, and hands those to `echolot-drivers`.

#![no_std]

pub mod capture;
pub mod clock;
pub mod gpio;

pub use capture::TimerCapture;
pub use clock::EmbassyClock;
pub use gpio::FlexPin;

// Re-export shared types from echolot-hal
pub use echolot_hal::capture::{Edge, Prescaler};
