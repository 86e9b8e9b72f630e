mod app;

use anyhow::{Context, anyhow};
use blight_core::{ClientConfig, HttpPredictor};
use eframe::{NativeOptions, egui};

use app::UiApp;

fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run() {
        tracing::error!("{e:#}");
        eprintln!("Application stopped with error: {e:#}");
    }
}

fn run() -> anyhow::Result<()> {
    let config = ClientConfig::load().context("loading configuration")?;
    let endpoint = config.endpoint_url()?;
    tracing::info!("prediction endpoint: {endpoint}");
    let client = HttpPredictor::new(endpoint).context("creating HTTP client")?;

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 600.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(UiApp::new(config, client)))),
    )
    .map_err(|e| anyhow!("window failed: {e}"))
}
