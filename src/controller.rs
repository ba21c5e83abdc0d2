//! Slider and button to MIDI translation
//!
//! The [`Controller`] owns the open output port and turns each interaction
//! into exactly one outbound message. It is Open from construction until
//! [`Controller::close`], after which every callback is refused without
//! touching the port.

use tracing::{debug, info, warn};

use crate::error::{ControllerError, Result};
use crate::midi::{convert, format_hex, MidiMessage};
use crate::transport::{MidiOutputHandle, MidiTransport};

/// Controller number the slider drives (modulation wheel)
pub const CC_NUMBER: u8 = 1;
/// Note sent by the Play button
pub const PLAY_NOTE: u8 = 60;
/// Note sent by the Cue button
pub const CUE_NOTE: u8 = 62;
/// Velocity for both buttons
pub const VELOCITY: u8 = 100;
/// MIDI channel 1
pub const CHANNEL: u8 = 0;

/// Slider lower bound
pub const SLIDER_MIN: f64 = -8.0;
/// Slider upper bound
pub const SLIDER_MAX: f64 = 8.0;
/// Slider resolution
pub const SLIDER_STEP: f64 = 0.1;

/// Owner of the MIDI output and the three interaction mappings
pub struct Controller<H: MidiOutputHandle> {
    port_name: String,
    /// `None` once closed
    handle: Option<H>,
}

impl<H: MidiOutputHandle> Controller<H> {
    /// Open `port_name` through `transport`
    ///
    /// Fails with [`ControllerError::PortOpen`] when the port is missing or busy.
    pub fn open<T>(transport: &T, port_name: &str) -> Result<Self>
    where
        T: MidiTransport<Output = H>,
    {
        let handle = transport.open_output(port_name)?;
        info!("MIDI output '{}' opened", port_name);
        Ok(Self::from_handle(port_name, handle))
    }

    /// Wrap an already opened output
    pub fn from_handle(port_name: impl Into<String>, handle: H) -> Self {
        Self {
            port_name: port_name.into(),
            handle: Some(handle),
        }
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Slider moved to `raw_value` (nominally -8.0..=8.0): send CC 1
    pub fn on_slider_changed(&mut self, raw_value: f64) -> Result<MidiMessage> {
        let value = slider_to_cc(raw_value);
        self.send("CC", MidiMessage::ControlChange {
            channel: CHANNEL,
            cc: CC_NUMBER,
            value,
        })
    }

    /// Play pressed: Note On 60
    pub fn on_play_pressed(&mut self) -> Result<MidiMessage> {
        self.send("Play", note_on(PLAY_NOTE))
    }

    /// Cue pressed: Note On 62
    pub fn on_cue_pressed(&mut self) -> Result<MidiMessage> {
        self.send("Cue", note_on(CUE_NOTE))
    }

    /// Release the output port. Later calls are no-ops.
    pub fn close(&mut self) {
        match self.handle.take() {
            Some(handle) => {
                handle.close();
                info!("Controller closed ({})", self.port_name);
            }
            None => debug!("Controller already closed"),
        }
    }

    fn send(&mut self, label: &str, message: MidiMessage) -> Result<MidiMessage> {
        let handle = self.handle.as_mut().ok_or(ControllerError::Closed)?;
        let bytes = message.encode();

        match message {
            MidiMessage::ControlChange { value, .. } => info!("Sending {}: {}", label, value),
            MidiMessage::NoteOn { note, .. } => info!("Sending {} (Note On: {})", label, note),
        }

        if let Err(e) = handle.send(&bytes) {
            warn!("Dropped {} ({}): {}", message, format_hex(&bytes), e);
            return Err(e);
        }

        debug!("Sent: {} | {}", format_hex(&bytes), message);
        Ok(message)
    }
}

impl<H: MidiOutputHandle> Drop for Controller<H> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Slider position to CC value, round half up
pub fn slider_to_cc(raw_value: f64) -> u8 {
    convert::slider_to_cc(raw_value, SLIDER_MIN, SLIDER_MAX)
}

fn note_on(note: u8) -> MidiMessage {
    MidiMessage::NoteOn {
        channel: CHANNEL,
        note,
        velocity: VELOCITY,
    }
}
