mod backend_bridge;
mod controller;
mod media;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use crate::{
    backend_bridge::commands::BackendCommand, controller::events::UiEvent, ui::ValentineApp,
};

#[derive(Parser, Debug)]
#[command(about = "Asks the one question that matters")]
struct Args {
    /// Settings file; defaults to ./valentine.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = valentine_core::load_settings(args.config.as_deref())
        .context("failed to load valentine settings")?;
    let collaborator = emailjs_integration::build_collaborator(&settings.notification);
    tracing::info!(notifier = collaborator.name(), "starting valentine");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, collaborator)
        .context("failed to start backend worker thread")?;

    let title = settings.copy.window_title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(ValentineApp::new(cmd_tx, ui_rx, settings)))),
    )
    .map_err(|err| anyhow::anyhow!("ui event loop failed: {err}"))
}
