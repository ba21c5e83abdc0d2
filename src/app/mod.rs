//! Controller window - slider and Play/Cue buttons
//!
//! Built on eframe/egui. The window owns the [`Controller`] and closes it when
//! the user closes the window.

mod rendering;
mod window;

pub use window::{ControllerApp, Status, UiEvent};

use anyhow::{anyhow, Result};

use crate::controller::Controller;
use crate::transport::MidiOutputHandle;

/// Window and viewport title
pub const WINDOW_TITLE: &str = "MIDI Controller";

/// Entry point for the controller window
///
/// Blocks until the window is closed. The controller's port is released
/// before this returns.
pub fn run_window<H>(controller: Controller<H>) -> Result<()>
where
    H: MidiOutputHandle + 'static,
{
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([340.0, 220.0])
            .with_min_inner_size([280.0, 180.0]),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(|_cc| Ok(Box::new(ControllerApp::new(controller)))),
    )
    .map_err(|e| anyhow!("Window error: {}", e))
}
