//! Main application struct and event dispatch for the controller window.

use std::time::Duration;

use tracing::{debug, warn};

use super::rendering::{render_led, status_color};
use crate::activity::{ActivityTracker, Control};
use crate::controller::{Controller, SLIDER_MAX, SLIDER_MIN, SLIDER_STEP};
use crate::error::ControllerError;
use crate::midi::{convert, MidiMessage};
use crate::transport::MidiOutputHandle;

/// Label shown above the slider
pub const SLIDER_LABEL: &str = "Slider (-8% to 8%)";

/// Widget interactions, in the order the user produced them
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    SliderMoved(f64),
    PlayPressed,
    CuePressed,
    CloseRequested,
}

/// What the status line shows
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Ready,
    Sent(MidiMessage),
    Failed(String),
    Closed,
}

/// The controller window
pub struct ControllerApp<H: MidiOutputHandle> {
    controller: Controller<H>,
    slider_value: f64,
    activity: ActivityTracker,
    status: Status,
}

impl<H: MidiOutputHandle> ControllerApp<H> {
    pub fn new(controller: Controller<H>) -> Self {
        Self {
            controller,
            slider_value: 0.0,
            activity: ActivityTracker::default(),
            status: Status::Ready,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn activity(&self) -> &ActivityTracker {
        &self.activity
    }

    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    /// Run one interaction through the controller
    ///
    /// Send failures are reported in the status line and the window stays
    /// usable. Events arriving after close are ignored.
    pub fn handle_event(&mut self, event: UiEvent) {
        if !self.controller.is_open() {
            debug!("Ignoring {:?} after close", event);
            return;
        }

        let (control, result) = match event {
            UiEvent::SliderMoved(value) => {
                self.slider_value = value;
                (Control::Slider, self.controller.on_slider_changed(value))
            }
            UiEvent::PlayPressed => (Control::Play, self.controller.on_play_pressed()),
            UiEvent::CuePressed => (Control::Cue, self.controller.on_cue_pressed()),
            UiEvent::CloseRequested => {
                self.controller.close();
                self.status = Status::Closed;
                return;
            }
        };

        match result {
            Ok(message) => {
                self.activity.record_sent(control);
                self.status = Status::Sent(message);
            }
            Err(ControllerError::Closed) => {
                self.status = Status::Closed;
            }
            Err(e) => {
                warn!("{:?} message dropped: {}", control, e);
                self.activity.record_dropped(control);
                self.status = Status::Failed(e.to_string());
            }
        }
    }

    fn status_text(&self) -> String {
        match &self.status {
            Status::Ready => format!("Ready on {}", self.controller.port_name()),
            Status::Sent(message @ MidiMessage::ControlChange { value, .. }) => {
                format!("{} ({:.0}%)", message, convert::to_percent_7bit(*value))
            }
            Status::Sent(message) => message.to_string(),
            Status::Failed(reason) => reason.clone(),
            Status::Closed => "Closed".to_string(),
        }
    }
}

impl<H: MidiOutputHandle> eframe::App for ControllerApp<H> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();

        if ctx.input(|i| i.viewport().close_requested()) {
            events.push(UiEvent::CloseRequested);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(SLIDER_LABEL);

            ui.horizontal(|ui| {
                let mut value = self.slider_value;
                let response = ui.add(
                    egui::Slider::new(&mut value, SLIDER_MIN..=SLIDER_MAX)
                        .step_by(SLIDER_STEP)
                        .fixed_decimals(1),
                );
                if response.changed() && value != self.slider_value {
                    events.push(UiEvent::SliderMoved(value));
                }
                render_led(ui, &self.activity, Control::Slider);
            });

            ui.add_space(6.0);

            ui.horizontal(|ui| {
                if ui.button("Play").clicked() {
                    events.push(UiEvent::PlayPressed);
                }
                render_led(ui, &self.activity, Control::Play);
            });

            ui.horizontal(|ui| {
                if ui.button("Cue").clicked() {
                    events.push(UiEvent::CuePressed);
                }
                render_led(ui, &self.activity, Control::Cue);
            });

            ui.separator();

            ui.label(
                egui::RichText::new(self.status_text())
                    .color(status_color(matches!(self.status, Status::Failed(_))))
                    .family(egui::FontFamily::Monospace)
                    .size(11.0),
            );
            ui.label(
                egui::RichText::new(format!(
                    "{} | sent {} | dropped {}",
                    self.controller.port_name(),
                    self.activity.sent(),
                    self.activity.dropped()
                ))
                .color(egui::Color32::from_gray(140))
                .size(10.0),
            );
        });

        for event in events {
            self.handle_event(event);
        }

        // Keep LEDs fading without waiting for input
        ctx.request_repaint_after(Duration::from_millis(50));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.close();
    }
}
