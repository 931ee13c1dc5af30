//! Echo session state machine
//!
//! One measurement is a session: armed by the ranger, started by the
//! trigger pulse, advanced by two capture edges, consumed by the reader.
//! The transition table here is pure; the shared atomic cell that the
//! interrupt handler drives lives in `echolot-drivers::ultrasonic`.

pub mod events;
pub mod machine;

pub use events::SessionEvent;
pub use machine::SessionState;
