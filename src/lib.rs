//! MIDI Controller
//!
//! A window with a slider and Play/Cue buttons that sends Control Change and
//! Note On messages to one MIDI output port.

pub mod activity;
pub mod app;
pub mod cli;
pub mod controller;
pub mod error;
pub mod logging;
pub mod midi;
pub mod transport;

pub use controller::Controller;
pub use error::ControllerError;
pub use midi::MidiMessage;
pub use transport::{MidiOutputHandle, MidiTransport, MidirTransport};
