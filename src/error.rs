//! Error types for port selection, port opening and message delivery

use thiserror::Error;

/// Errors raised by the controller and its MIDI transport
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ControllerError {
    /// No MIDI output ports are available
    #[error("no MIDI output ports available")]
    PortEnumerationEmpty,

    /// The user picked an index that does not name a port
    #[error("invalid port index '{input}' (expected 0..{available})")]
    PortIndexInvalid { input: String, available: usize },

    /// The transport could not open the selected port
    #[error("failed to open MIDI output '{port}': {reason}")]
    PortOpen { port: String, reason: String },

    /// A message could not be delivered on an open port
    #[error("failed to send to '{port}': {reason}")]
    Send { port: String, reason: String },

    /// A callback fired after the port was closed
    #[error("MIDI output already closed")]
    Closed,

    /// The MIDI client itself could not be created
    #[error("MIDI transport unavailable: {0}")]
    Transport(String),
}

pub type Result<T, E = ControllerError> = std::result::Result<T, E>;
