//! Events that trigger session transitions

/// Events that can advance a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    // Mainline events
    /// Ranger initialized; starts a fresh session
    Arm,
    /// Trigger pulse issued
    Trigger,
    /// Result read by the caller
    Consume,
    /// Deadline passed before completion
    Abandon,

    // Interrupt events
    /// Capture unit latched an edge
    Edge,
}
