use std::path::PathBuf;

use caliper_core::config::MeasureConfig;
use caliper_core::source::SourceImage;
use caliper_core::store::MeasurementStore;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode an image file.
    LoadImage { path: PathBuf },

    /// Write a snapshot of the measurements as CSV.
    ExportCsv {
        path: PathBuf,
        store: MeasurementStore,
    },

    ImportSettings { path: PathBuf },

    ExportSettings {
        path: PathBuf,
        config: MeasureConfig,
    },
}

/// Results sent from worker (or dialog) threads back to UI thread.
pub enum WorkerResult {
    ImageLoaded {
        image: SourceImage,
    },
    CsvExported {
        path: PathBuf,
        count: usize,
    },
    SettingsImported {
        path: PathBuf,
        config: MeasureConfig,
    },
    /// A file dialog was dismissed.
    Cancelled {
        action: &'static str,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
