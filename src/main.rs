//! MIDI Controller
//!
//! Pick an output port, then drive it from a slider and two buttons.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use midi_controller::cli::{self, Args};
use midi_controller::logging::init_logging;
use midi_controller::transport::discovery;
use midi_controller::{app, Controller, MidirTransport};

/// Client name the platform MIDI API shows for this process
const MIDI_CLIENT_NAME: &str = "MIDI Controller";

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = init_logging(&args.log_level, args.log_dir.as_deref())?;

    info!("Starting MIDI Controller...");

    let transport = MidirTransport::new(MIDI_CLIENT_NAME);

    // Handle list ports
    if args.list_ports {
        let ports = discovery::discover_output_ports(&transport)?;
        cli::print_ports(&ports);
        return Ok(());
    }

    let port_name = cli::choose_port(&transport, args.port.as_deref())?;

    let controller = Controller::open(&transport, &port_name)
        .with_context(|| format!("Cannot start on '{}'", port_name))?;

    // Blocks until the window closes; the window closes the port on exit
    app::run_window(controller)?;

    info!("MIDI Controller shutdown complete");
    Ok(())
}
