//! MIDI output transport
//!
//! The controller talks to MIDI through [`MidiTransport`] and
//! [`MidiOutputHandle`]. [`MidirTransport`] is the real backend; tests use the
//! recording fake in the `fake` module.

use midir::{MidiOutput, MidiOutputConnection, MidiOutputPort};
use tracing::{debug, info};

use crate::error::{ControllerError, Result};
use crate::midi::format_hex;

/// Enumerates and opens MIDI output ports
pub trait MidiTransport {
    type Output: MidiOutputHandle;

    /// Names of all output ports currently visible, in backend order
    fn list_output_ports(&self) -> Result<Vec<String>>;

    /// Open the output port called `port_name`
    fn open_output(&self, port_name: &str) -> Result<Self::Output>;
}

/// An open MIDI output port
pub trait MidiOutputHandle {
    /// Deliver one raw MIDI message
    fn send(&mut self, bytes: &[u8]) -> Result<()>;

    /// Release the port
    fn close(self);
}

/// Index of the port named `pattern`
///
/// An exact name wins; otherwise the first case-insensitive substring match.
/// A blank pattern matches nothing.
pub fn match_port(names: &[String], pattern: &str) -> Option<usize> {
    if pattern.trim().is_empty() {
        return None;
    }

    names.iter().position(|name| name == pattern).or_else(|| {
        let needle = pattern.to_lowercase();
        names
            .iter()
            .position(|name| name.to_lowercase().contains(&needle))
    })
}

/// Transport backed by the platform MIDI API (ALSA, CoreMIDI, WinMM)
pub struct MidirTransport {
    client_name: String,
}

impl MidirTransport {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
        }
    }

    fn client(&self) -> Result<MidiOutput> {
        MidiOutput::new(&self.client_name).map_err(|e| ControllerError::Transport(e.to_string()))
    }

    /// Find an output port using [`match_port`]
    fn find_output_port(midi_out: &MidiOutput, pattern: &str) -> Option<(MidiOutputPort, String)> {
        let (ports, names): (Vec<MidiOutputPort>, Vec<String>) = midi_out
            .ports()
            .into_iter()
            .filter_map(|port| midi_out.port_name(&port).ok().map(|name| (port, name)))
            .unzip();

        let idx = match_port(&names, pattern)?;
        let name = names.into_iter().nth(idx)?;
        let port = ports.into_iter().nth(idx)?;
        debug!("Found port '{}' matching pattern '{}'", name, pattern);
        Some((port, name))
    }
}

impl MidiTransport for MidirTransport {
    type Output = MidirOutput;

    fn list_output_ports(&self) -> Result<Vec<String>> {
        let midi_out = self.client()?;

        let mut port_names = Vec::new();
        for port in midi_out.ports() {
            if let Ok(name) = midi_out.port_name(&port) {
                port_names.push(name);
            }
        }

        Ok(port_names)
    }

    fn open_output(&self, port_name: &str) -> Result<MidirOutput> {
        let midi_out = self.client()?;

        let (port, resolved) =
            Self::find_output_port(&midi_out, port_name).ok_or_else(|| ControllerError::PortOpen {
                port: port_name.to_string(),
                reason: "port not found".to_string(),
            })?;

        info!("Connecting to output port: {}", resolved);

        let connection = midi_out
            .connect(&port, &self.client_name)
            .map_err(|e| ControllerError::PortOpen {
                port: resolved.clone(),
                reason: e.to_string(),
            })?;

        Ok(MidirOutput {
            port_name: resolved,
            connection,
        })
    }
}

/// Open midir output connection
pub struct MidirOutput {
    port_name: String,
    connection: MidiOutputConnection,
}

impl MidiOutputHandle for MidirOutput {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.connection
            .send(bytes)
            .map_err(|e| ControllerError::Send {
                port: self.port_name.clone(),
                reason: e.to_string(),
            })?;
        debug!("Sent raw: {}", format_hex(bytes));
        Ok(())
    }

    fn close(self) {
        // The returned client is not reused.
        let _client = self.connection.close();
        info!("MIDI output '{}' closed", self.port_name);
    }
}

/// Port discovery utilities
pub mod discovery {
    use super::MidiTransport;
    use crate::error::Result;

    /// Information about a MIDI port
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct PortInfo {
        pub index: usize,
        pub name: String,
        pub is_virtual: bool,
    }

    /// Loopback drivers and OS-provided buses rather than physical devices
    pub fn is_virtual_port(name: &str) -> bool {
        ["Virtual", "loopMIDI", "IAC", "Through"]
            .iter()
            .any(|tag| name.contains(tag))
    }

    /// Discover output ports with their selection index
    pub fn discover_output_ports<T: MidiTransport>(transport: &T) -> Result<Vec<PortInfo>> {
        Ok(transport
            .list_output_ports()?
            .into_iter()
            .enumerate()
            .map(|(index, name)| PortInfo {
                index,
                is_virtual: is_virtual_port(&name),
                name,
            })
            .collect())
    }
}
