//! Small drawing helpers for the controller window

use crate::activity::{ActivityTracker, Control};

const LED_ON: egui::Color32 = egui::Color32::from_rgb(80, 220, 120);
const LED_OFF: egui::Color32 = egui::Color32::from_gray(60);

/// Draw a round activity LED for `control`
pub fn render_led(ui: &mut egui::Ui, activity: &ActivityTracker, control: Control) {
    let (rect, _response) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
    let color = if activity.is_active(control) {
        LED_ON
    } else {
        LED_OFF
    };
    ui.painter().circle_filled(rect.center(), 5.0, color);
}

/// Status line text colour: red for errors, grey otherwise
pub fn status_color(is_error: bool) -> egui::Color32 {
    if is_error {
        egui::Color32::from_rgb(255, 110, 110)
    } else {
        egui::Color32::from_gray(180)
    }
}
