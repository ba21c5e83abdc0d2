//! Command-line interface and the interactive port prompt

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use rustyline::DefaultEditor;
use tracing::info;

use crate::error::ControllerError;
use crate::transport::discovery::{self, PortInfo};
use crate::transport::MidiTransport;

/// Prompt shown when asking for a port index
pub const PORT_PROMPT: &str = "Select the MIDI output port index: ";

/// MIDI Controller - slider and Play/Cue buttons over a MIDI output port
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Output port to use, by index or name (skips the prompt)
    #[arg(short, long, env = "MIDI_CONTROLLER_PORT")]
    pub port: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Also write logs to daily files in this directory
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<std::path::PathBuf>,

    /// List available MIDI output ports and exit
    #[arg(long)]
    pub list_ports: bool,
}

/// Print output ports as `[i] name`
pub fn print_ports(ports: &[PortInfo]) {
    println!("{}", "Available MIDI output ports:".bold().cyan());
    if ports.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for port in ports {
        let virtual_tag = if port.is_virtual { " [VIRTUAL]" } else { "" };
        println!("[{}] {}{}", port.index, port.name, virtual_tag.yellow());
    }
}

/// Resolve a typed index against the port list
pub fn select_port(ports: &[PortInfo], input: &str) -> Result<String, ControllerError> {
    if ports.is_empty() {
        return Err(ControllerError::PortEnumerationEmpty);
    }

    let input = input.trim();
    let invalid = || ControllerError::PortIndexInvalid {
        input: input.to_string(),
        available: ports.len(),
    };

    let index: usize = input.parse().map_err(|_| invalid())?;
    ports
        .iter()
        .find(|p| p.index == index)
        .map(|p| p.name.clone())
        .ok_or_else(invalid)
}

/// Resolve `--port`: a number picks from the list, anything else is a name
pub fn resolve_port_arg(ports: &[PortInfo], arg: &str) -> Result<String, ControllerError> {
    if arg.trim().is_empty() {
        Err(ControllerError::PortOpen {
            port: arg.to_string(),
            reason: "empty port name".to_string(),
        })
    } else if arg.trim().parse::<usize>().is_ok() {
        select_port(ports, arg)
    } else if ports.is_empty() {
        Err(ControllerError::PortEnumerationEmpty)
    } else {
        Ok(arg.to_string())
    }
}

/// Read one line from the terminal
fn prompt_line(prompt: &str) -> Result<String> {
    let mut rl = DefaultEditor::new()?;
    let line = rl.readline(prompt).context("No port index entered")?;
    Ok(line)
}

/// Enumerate ports, then take the port from `--port` or ask for an index
pub fn choose_port<T: MidiTransport>(transport: &T, port_arg: Option<&str>) -> Result<String> {
    let ports = discovery::discover_output_ports(transport)?;
    if ports.is_empty() {
        return Err(ControllerError::PortEnumerationEmpty.into());
    }

    let port_name = match port_arg {
        Some(arg) => resolve_port_arg(&ports, arg)?,
        None => {
            print_ports(&ports);
            let line = prompt_line(PORT_PROMPT)?;
            select_port(&ports, &line)?
        }
    };

    info!("Selected MIDI output: {}", port_name);
    Ok(port_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::FakeTransport;

    fn ports(names: &[&str]) -> Vec<PortInfo> {
        discovery::discover_output_ports(&FakeTransport::with_ports(names)).unwrap()
    }

    #[test]
    fn test_select_valid_index() {
        let ports = ports(&["Midi Through", "loopMIDI Port"]);
        assert_eq!(select_port(&ports, "1\n").unwrap(), "loopMIDI Port");
        assert_eq!(select_port(&ports, " 0 ").unwrap(), "Midi Through");
    }

    #[test]
    fn test_select_out_of_range() {
        let ports = ports(&["A", "B"]);
        assert_eq!(
            select_port(&ports, "2"),
            Err(ControllerError::PortIndexInvalid {
                input: "2".to_string(),
                available: 2
            })
        );
    }

    #[test]
    fn test_select_non_numeric_and_negative() {
        let ports = ports(&["A"]);
        assert!(matches!(
            select_port(&ports, "abc"),
            Err(ControllerError::PortIndexInvalid { .. })
        ));
        assert!(matches!(
            select_port(&ports, "-1"),
            Err(ControllerError::PortIndexInvalid { .. })
        ));
    }

    #[test]
    fn test_select_from_empty_list() {
        assert_eq!(select_port(&[], "0"), Err(ControllerError::PortEnumerationEmpty));
    }

    #[test]
    fn test_port_arg_by_index_or_name() {
        let ports = ports(&["A", "loopMIDI Port"]);
        assert_eq!(resolve_port_arg(&ports, "1").unwrap(), "loopMIDI Port");
        assert_eq!(resolve_port_arg(&ports, "loopmidi").unwrap(), "loopmidi");
        assert!(matches!(
            resolve_port_arg(&ports, "9"),
            Err(ControllerError::PortIndexInvalid { .. })
        ));
    }

    #[test]
    fn test_blank_port_arg_is_rejected() {
        let ports = ports(&["A", "loopMIDI Port"]);
        for arg in ["", "   "] {
            assert_eq!(
                resolve_port_arg(&ports, arg),
                Err(ControllerError::PortOpen {
                    port: arg.to_string(),
                    reason: "empty port name".to_string()
                })
            );
        }
    }

    #[test]
    fn test_choose_port_with_arg_skips_prompt() {
        let transport = FakeTransport::with_ports(&["A", "B"]);
        assert_eq!(choose_port(&transport, Some("1")).unwrap(), "B");
    }

    #[test]
    fn test_choose_port_without_ports_fails() {
        let transport = FakeTransport::with_ports(&[]);
        let err = choose_port(&transport, Some("0")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ControllerError>(),
            Some(&ControllerError::PortEnumerationEmpty)
        );
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["midi-controller", "--port", "loopMIDI", "-l", "debug"]);
        assert_eq!(args.port.as_deref(), Some("loopMIDI"));
        assert_eq!(args.log_level, "debug");
        assert!(!args.list_ports);
    }
}
