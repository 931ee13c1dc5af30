//! Session state definition

use super::events::SessionEvent;

/// Echo session states
///
/// Stored in a single byte so the live session can sit in an atomic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SessionState {
    /// No session; capture events are ignored
    #[default]
    Idle = 0,
    /// Capture unit configured, trigger not yet issued
    Armed = 1,
    /// Trigger issued, waiting for the echo line to rise
    AwaitingRising = 2,
    /// Echo line is high, counter running from zero
    AwaitingFalling = 3,
    /// Pulse width latched and ready to read
    Complete = 4,
}

impl SessionState {
    /// Decode a stored state byte
    ///
    /// Unknown values decode as `Idle`, which ignores every edge.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => SessionState::Armed,
            2 => SessionState::AwaitingRising,
            3 => SessionState::AwaitingFalling,
            4 => SessionState::Complete,
            _ => SessionState::Idle,
        }
    }

    /// Encode for atomic storage
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Edge phase counter: 1 while the echo line is high, 0 otherwise
    pub fn phase(&self) -> u8 {
        match self {
            SessionState::AwaitingFalling => 1,
            _ => 0,
        }
    }

    /// Check if a capture edge would advance this state
    pub fn accepts_edge(&self) -> bool {
        matches!(
            self,
            SessionState::AwaitingRising | SessionState::AwaitingFalling
        )
    }

    /// Check if a session is in progress
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            SessionState::Armed | SessionState::AwaitingRising | SessionState::AwaitingFalling
        )
    }

    /// Process an event and return the next state
    pub fn transition(self, event: SessionEvent) -> Self {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            // Arming always starts over, dropping any progress
            (_, Arm) => Armed,

            (Armed, Trigger) => AwaitingRising,

            // Edges
            (AwaitingRising, Edge) => AwaitingFalling,
            (AwaitingFalling, Edge) => Complete,

            (Complete, Consume) => Idle,

            (Armed | AwaitingRising | AwaitingFalling, Abandon) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
