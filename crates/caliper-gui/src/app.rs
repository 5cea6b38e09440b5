use std::sync::mpsc;

use caliper_core::config::MeasureConfig;
use caliper_core::error::CaliperError;
use caliper_core::export::{format_value, render, ExportFormat};
use caliper_core::geometry::Point;
use caliper_core::refine::Refiner;
use caliper_core::session::{Session, SubmitOutcome};
use caliper_core::source::SourceImage;

use crate::convert::rgba_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{MagnifierState, ScalePromptState, UIState, ViewportState};
use crate::workers;

pub struct CaliperApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    /// Lets dialog threads report straight back to the UI.
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub magnifier: MagnifierState,
    pub scale_prompt: ScalePromptState,
    pub session: Session,
    pub image: Option<SourceImage>,
    pub config: MeasureConfig,
    pub refiner: Refiner,
    pub show_about: bool,
}

impl CaliperApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(result_tx.clone(), ctx.clone());

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            magnifier: MagnifierState::default(),
            scale_prompt: ScalePromptState::default(),
            session: Session::new(),
            image: None,
            config: MeasureConfig::default(),
            refiner: Refiner::default(),
            show_about: false,
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::ImageLoaded { image } => {
                    self.ui_state.loading = false;
                    self.set_image(ctx, image);
                }
                WorkerResult::CsvExported { path, count } => {
                    self.ui_state
                        .add_log(format!("Exported {count} measurements to {}", path.display()));
                }
                WorkerResult::SettingsImported { path, config } => {
                    self.apply_config(config);
                    self.ui_state
                        .add_log(format!("Settings imported: {}", path.display()));
                }
                WorkerResult::Cancelled { action } => {
                    self.ui_state.loading = false;
                    self.ui_state.add_log(format!("{action}: {}", CaliperError::UserCancelled));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.loading = false;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    /// Show a freshly decoded image and start a new session for it.
    fn set_image(&mut self, ctx: &egui::Context, image: SourceImage) {
        let color = rgba_to_color_image(image.width(), image.height(), image.rgba_bytes());
        let texture = ctx.load_texture("viewport", color, egui::TextureOptions::NEAREST);
        self.viewport.texture = Some(texture);
        self.viewport.image_size = Some([image.width() as usize, image.height() as usize]);
        self.viewport.fit_requested = true;

        self.magnifier.close();
        self.scale_prompt.close();
        self.session = Session::new();

        self.ui_state.add_log(format!(
            "Opened: {} ({}x{}). Click two points to set the scale.",
            image
                .path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            image.width(),
            image.height()
        ));
        if image.width() < self.refiner.crop_size() || image.height() < self.refiner.crop_size() {
            self.ui_state.add_warning(format!(
                "Image is smaller than the {}px magnifier; points cannot be picked",
                self.refiner.crop_size()
            ));
        }
        self.ui_state.file_path = image.path.clone();
        self.image = Some(image);
    }

    pub fn apply_config(&mut self, config: MeasureConfig) {
        match Refiner::from_config(&config) {
            Ok(refiner) => {
                self.refiner = refiner;
                self.config = config;
            }
            Err(e) => self.ui_state.add_warning(e),
        }
    }

    /// Open the magnifier around a raw click (image pixel coordinates).
    pub fn open_magnifier(&mut self, ctx: &egui::Context, raw: Point) {
        let Some(image) = self.image.as_ref() else {
            return;
        };
        match self.refiner.refine(raw, image) {
            Ok(view) => {
                let color = rgba_to_color_image(view.size(), view.size(), view.rgba_bytes());
                self.magnifier.texture =
                    Some(ctx.load_texture("magnifier", color, egui::TextureOptions::NEAREST));
                self.magnifier.view = Some(view);
            }
            Err(e) => self.ui_state.add_warning(e),
        }
    }

    /// Map a click inside the magnified view back and feed it to the session.
    pub fn resolve_magnifier_click(&mut self, click: Point) {
        if let Some(view) = self.magnifier.close() {
            let refined = view.resolve(click);
            self.submit_refined(refined);
        }
    }

    /// The magnifier was closed without picking a point.
    pub fn dismiss_magnifier(&mut self) {
        if self.magnifier.close().is_some() {
            self.session.abandon_step();
            self.ui_state
                .add_log("Magnified view closed; current pair discarded".into());
        }
    }

    fn submit_refined(&mut self, point: Point) {
        match self.session.submit_point(point, &mut self.ui_state) {
            Ok(SubmitOutcome::Buffered { mode }) => {
                self.ui_state.add_log(format!(
                    "{mode}: first point at ({:.0}, {:.0})",
                    point.x, point.y
                ));
            }
            Ok(SubmitOutcome::ScaleLengthRequested { pixel_distance }) => {
                self.scale_prompt.request(pixel_distance);
            }
            Ok(SubmitOutcome::ScaleSet(_) | SubmitOutcome::MeasurementAdded(_)) => {}
            Err(e) => self.ui_state.add_warning(e),
        }
    }

    /// Confirm the reference length typed into the scale prompt.
    pub fn confirm_scale_length(&mut self) {
        let length = match self.scale_prompt.parsed_length() {
            Ok(v) => v,
            Err(msg) => {
                self.scale_prompt.error = Some(msg);
                return;
            }
        };
        match self.session.complete_calibration(length, &mut self.ui_state) {
            Ok(_) => self.scale_prompt.close(),
            Err(e @ CaliperError::InvalidScaleLength(_)) => {
                self.scale_prompt.error = Some(e.to_string());
            }
            Err(e) => {
                self.scale_prompt.close();
                self.session.cancel_calibration();
                self.ui_state.add_warning(e);
            }
        }
    }

    pub fn cancel_scale_prompt(&mut self) {
        self.scale_prompt.close();
        if self.session.cancel_calibration() {
            self.ui_state
                .add_log("Scale setting cancelled; pick two new points".into());
        }
    }

    pub fn copy_to_clipboard(&mut self, ctx: &egui::Context) {
        match render(self.session.store(), ExportFormat::Clipboard) {
            Ok(text) => {
                ctx.copy_text(text);
                self.ui_state.add_log("Measurements copied to clipboard".into());
            }
            Err(e) => self.ui_state.add_warning(e),
        }
    }

    /// Ask for a destination and hand the write to the worker.
    pub fn export_csv(&mut self, ctx: &egui::Context) {
        if self.session.store().is_empty() {
            self.ui_state.add_warning(CaliperError::EmptyExport);
            return;
        }
        let store = self.session.store().clone();
        let cmd_tx = self.cmd_tx.clone();
        let result_tx = self.result_tx.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            match rfd::FileDialog::new()
                .add_filter("CSV files", &["csv"])
                .add_filter("All files", &["*"])
                .set_file_name("measurements.csv")
                .save_file()
            {
                Some(path) => {
                    let _ = cmd_tx.send(WorkerCommand::ExportCsv { path, store });
                }
                None => workers::send(
                    &result_tx,
                    &ctx,
                    WorkerResult::Cancelled {
                        action: "Export to CSV",
                    },
                ),
            }
        });
    }

    /// One-line summary of the session for the status bar.
    pub fn session_summary(&self) -> String {
        match self.session.scale_factor() {
            Some(scale) => format!("{} | {scale}", self.session.mode()),
            None => match self.session.buffered_point() {
                Some(_) => format!("{} | pick second point", self.session.mode()),
                None => format!("{} | pick first point", self.session.mode()),
            },
        }
    }

    pub fn statistics_labels(&self) -> (String, String) {
        match self.session.statistics() {
            Some(stats) => (
                format!("Average: {} μm", format_value(stats.mean)),
                format!("Std Dev: {} μm", format_value(stats.std_dev)),
            ),
            None => ("Average: N/A".to_string(), "Std Dev: N/A".to_string()),
        }
    }
}

impl eframe::App for CaliperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::measurements::show(ctx, self);
        panels::viewport::show(ctx, self);
        panels::magnifier::show(ctx, self);
        panels::scale_prompt::show(ctx, self);

        if self.show_about {
            egui::Window::new("About")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Caliper");
                        ui.label("Calibrated distance measurement on images");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
