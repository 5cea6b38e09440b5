use std::path::Path;
use std::sync::mpsc;

use anyhow::{Context, Result};

use caliper_core::config::MeasureConfig;
use caliper_core::export::write_csv;
use caliper_core::source::load_image;
use caliper_core::store::MeasurementStore;

use crate::messages::WorkerResult;

use super::{send, send_log};

pub(super) fn handle_load_image(
    path: &Path,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> Result<()> {
    let image = load_image(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?;
    send(tx, ctx, WorkerResult::ImageLoaded { image });
    Ok(())
}

pub(super) fn handle_export_csv(
    path: &Path,
    store: &MeasurementStore,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> Result<()> {
    write_csv(store, path).with_context(|| format!("Failed to export {}", path.display()))?;
    send(
        tx,
        ctx,
        WorkerResult::CsvExported {
            path: path.to_path_buf(),
            count: store.len(),
        },
    );
    Ok(())
}

pub(super) fn handle_import_settings(
    path: &Path,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> Result<()> {
    let config = MeasureConfig::load(path)
        .with_context(|| format!("Failed to import settings from {}", path.display()))?;
    send(
        tx,
        ctx,
        WorkerResult::SettingsImported {
            path: path.to_path_buf(),
            config,
        },
    );
    Ok(())
}

pub(super) fn handle_export_settings(
    path: &Path,
    config: &MeasureConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> Result<()> {
    config
        .save(path)
        .with_context(|| format!("Failed to export settings to {}", path.display()))?;
    send_log(tx, ctx, format!("Settings saved: {}", path.display()));
    Ok(())
}
