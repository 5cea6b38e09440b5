use caliper_core::export::format_value;
use egui_plot::{Bar, BarChart, HLine, Plot};

use crate::app::CaliperApp;

const RIGHT_PANEL_WIDTH: f32 = 220.0;
const CHART_HEIGHT: f32 = 120.0;

pub fn show(ctx: &egui::Context, app: &mut CaliperApp) {
    egui::SidePanel::right("measurements")
        .default_width(RIGHT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.strong("Measurements");
            ui.add_space(4.0);

            // Buttons and statistics stay pinned to the bottom; the table fills the rest.
            egui::TopBottomPanel::bottom("measurement_actions")
                .show_separator_line(false)
                .show_inside(ui, |ui| {
                    values_chart(ui, app);
                    let (avg, std_dev) = app.statistics_labels();
                    ui.label(avg);
                    ui.label(std_dev);
                    ui.add_space(6.0);

                    let has_rows = !app.session.store().is_empty();
                    ui.horizontal(|ui| {
                        if ui
                            .add_enabled(has_rows, egui::Button::new("Copy to Clipboard"))
                            .clicked()
                        {
                            app.copy_to_clipboard(ctx);
                        }
                        if ui
                            .add_enabled(has_rows, egui::Button::new("Export to CSV"))
                            .clicked()
                        {
                            app.export_csv(ctx);
                        }
                    });
                    ui.add_space(4.0);
                });

            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    egui::Grid::new("measurement_table")
                        .striped(true)
                        .num_columns(2)
                        .min_col_width(50.0)
                        .show(ui, |ui| {
                            ui.strong("ID");
                            ui.strong("Distance (μm)");
                            ui.end_row();

                            for m in app.session.measurements() {
                                ui.label(m.id.to_string());
                                ui.label(format_value(m.value));
                                ui.end_row();
                            }
                        });
                });
        });
}

fn values_chart(ui: &mut egui::Ui, app: &CaliperApp) {
    let measurements = app.session.measurements();
    let Some(stats) = app.session.statistics() else {
        return;
    };

    let bars: Vec<Bar> = measurements
        .iter()
        .map(|m| {
            Bar::new(m.id as f64, m.value)
                .width(0.8)
                .fill(egui::Color32::from_rgb(200, 70, 70))
        })
        .collect();

    let mean_line = HLine::new("mean", stats.mean)
        .color(egui::Color32::from_rgb(255, 160, 40))
        .width(1.5);

    Plot::new("measurement_chart")
        .height(CHART_HEIGHT)
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid(false)
        .y_axis_label("μm")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("distances", bars));
            plot_ui.hline(mean_line);
        });
    ui.add_space(4.0);
}
