use caliper_core::consts::UNIT_LABEL;

use crate::app::CaliperApp;

/// Reference-length dialog for a completed calibration pair.
pub fn show(ctx: &egui::Context, app: &mut CaliperApp) {
    if !app.scale_prompt.open {
        return;
    }

    let mut confirm = false;
    let mut cancel = ctx.input(|i| i.key_pressed(egui::Key::Escape));

    egui::Window::new("Scale Setting")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!(
                "Enter the real-world distance between the points (in micrometers).\nPixel distance: {:.2} px",
                app.scale_prompt.pixel_distance
            ));
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut app.scale_prompt.input)
                        .desired_width(120.0)
                        .hint_text("e.g. 100"),
                );
                if app.scale_prompt.focus_pending {
                    response.request_focus();
                    app.scale_prompt.focus_pending = false;
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    confirm = true;
                }
                ui.label(UNIT_LABEL);
            });

            if let Some(ref err) = app.scale_prompt.error {
                ui.colored_label(egui::Color32::from_rgb(230, 90, 90), err);
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    confirm = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if confirm {
        app.confirm_scale_length();
    } else if cancel {
        app.cancel_scale_prompt();
    }
}
