use std::sync::mpsc;

use crate::messages::{WorkerCommand, WorkerResult};

use super::io;

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("caliper-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_log(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Log {
            message: msg.into(),
        },
    );
}

pub(crate) fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: msg.into(),
        },
    );
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        let outcome = match cmd {
            WorkerCommand::LoadImage { path } => io::handle_load_image(&path, &tx, &ctx),
            WorkerCommand::ExportCsv { path, store } => {
                io::handle_export_csv(&path, &store, &tx, &ctx)
            }
            WorkerCommand::ImportSettings { path } => io::handle_import_settings(&path, &tx, &ctx),
            WorkerCommand::ExportSettings { path, config } => {
                io::handle_export_settings(&path, &config, &tx, &ctx)
            }
        };

        if let Err(e) = outcome {
            tracing::error!("{e:#}");
            send_error(&tx, &ctx, format!("{e:#}"));
        }
    }
}
