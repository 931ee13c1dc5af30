//! Configuration types
//!
//! Board-agnostic ranging configuration. Board pin maps live in the
//! firmware crate.

pub mod ranger;

pub use ranger::*;
