use std::path::PathBuf;

use caliper_core::bridge::SessionObserver;
use caliper_core::export::format_value;
use caliper_core::session::ScaleFactor;
use caliper_core::store::{Measurement, Statistics};

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub file_path: Option<PathBuf>,

    /// Log messages.
    pub log_messages: Vec<String>,

    /// An image decode is in flight.
    pub loading: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn add_warning(&mut self, msg: impl std::fmt::Display) {
        tracing::warn!("{msg}");
        self.log_messages.push(format!("WARNING: {msg}"));
    }
}

impl SessionObserver for UIState {
    fn on_scale_set(&mut self, scale: ScaleFactor) {
        self.add_log(format!("Scale set ({scale}). Now you can measure distances."));
    }

    fn on_measurement_added(&mut self, measurement: &Measurement, statistics: &Statistics) {
        self.add_log(format!(
            "#{}: {} μm (mean {} μm over {})",
            measurement.id,
            format_value(measurement.value),
            format_value(statistics.mean),
            statistics.count
        ));
    }
}
