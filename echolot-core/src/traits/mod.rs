//! Boundary traits
//!
//! These traits define the interface between the ranging logic and the
//! drivers that implement it, so each side can be tested against a mock
//! of the other.

pub mod capture;
pub mod display;

pub use capture::{CaptureControl, CaptureHandler, CaptureTimer, SharedCaptureTimer};
pub use display::{CharacterDisplay, DisplayError};
