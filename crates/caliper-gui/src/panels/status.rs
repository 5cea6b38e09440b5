use crate::app::CaliperApp;

pub fn show(ctx: &egui::Context, app: &mut CaliperApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area — fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            if app.ui_state.loading {
                ui.spinner();
                ui.label("Loading...");
                ui.separator();
            }
            if let Some(ref size) = app.viewport.image_size {
                ui.label(format!("{}x{}", size[0], size[1]));
                ui.separator();
            }
            ui.label(format!("Zoom: {:.0}%", app.viewport.zoom * 100.0));
            ui.separator();
            ui.label(app.session_summary());
            ui.separator();
            ui.label(format!(
                "Magnifier: {}px x{}",
                app.refiner.crop_size(),
                app.refiner.magnification()
            ));
        });

        ui.add_space(2.0);
    });
}
