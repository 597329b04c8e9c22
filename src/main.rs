mod app;
mod autoplay;
mod ctrl;
mod engine;
mod game;
mod i18n;
mod pgn;
mod router;
mod study;
mod ui;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Analyse Board");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 700.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Analyse Board"),
        ..Default::default()
    };

    eframe::run_native(
        "Analyse Board",
        native_options,
        Box::new(|cc| Ok(Box::new(app::AnalyseApp::new(cc)?))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))
}
