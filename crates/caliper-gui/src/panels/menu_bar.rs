use caliper_core::config::MeasureConfig;

use crate::app::CaliperApp;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::workers;

pub fn show(ctx: &egui::Context, app: &mut CaliperApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Load Image...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_file(ctx, app);
                }

                let export_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
                if ui.add(egui::Button::new("Export to CSV...").shortcut_text(ctx.format_shortcut(&export_shortcut))).clicked() {
                    ui.close();
                    app.export_csv(ctx);
                }

                ui.separator();

                if ui.button("Import Settings...").clicked() {
                    ui.close();
                    import_settings(ctx, app);
                }

                if ui.button("Export Settings...").clicked() {
                    ui.close();
                    export_settings(ctx, app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Copy to Clipboard").clicked() {
                    ui.close();
                    app.copy_to_clipboard(ctx);
                }
                if ui.button("Reset Settings").clicked() {
                    ui.close();
                    app.apply_config(MeasureConfig::default());
                    app.ui_state.add_log("Settings reset to defaults".into());
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Fit to Window").clicked() {
                    ui.close();
                    app.viewport.fit_requested = true;
                }
                if ui.button("Actual Size").clicked() {
                    ui.close();
                    app.viewport.zoom = 1.0;
                    app.viewport.pan_offset = egui::Vec2::ZERO;
                }
                ui.checkbox(&mut app.config.show_safe_zone, "Show Safe Zone");
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_file(ctx, app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S))) {
            app.export_csv(ctx);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

pub fn open_file(ctx: &egui::Context, app: &mut CaliperApp) {
    let cmd_tx = app.cmd_tx.clone();
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    app.ui_state.loading = true;
    std::thread::spawn(move || {
        match rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "gif", "webp"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            Some(path) => {
                let _ = cmd_tx.send(WorkerCommand::LoadImage { path });
            }
            None => workers::send(&result_tx, &ctx, WorkerResult::Cancelled { action: "Load image" }),
        }
    });
}

fn import_settings(ctx: &egui::Context, app: &mut CaliperApp) {
    let cmd_tx = app.cmd_tx.clone();
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        match rfd::FileDialog::new().add_filter("TOML", &["toml"]).pick_file() {
            Some(path) => {
                let _ = cmd_tx.send(WorkerCommand::ImportSettings { path });
            }
            None => workers::send(&result_tx, &ctx, WorkerResult::Cancelled { action: "Import settings" }),
        }
    });
}

fn export_settings(ctx: &egui::Context, app: &mut CaliperApp) {
    let config = app.config.clone();
    let cmd_tx = app.cmd_tx.clone();
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        match rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("caliper.toml")
            .save_file()
        {
            Some(path) => {
                let _ = cmd_tx.send(WorkerCommand::ExportSettings { path, config });
            }
            None => workers::send(&result_tx, &ctx, WorkerResult::Cancelled { action: "Export settings" }),
        }
    });
}
