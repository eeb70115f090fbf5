// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Parser;
use fabstir_layout_ocr::{
    api::{start_server, AppState},
    cli::Cli,
    version,
    vision::{OcrModelConfig, OcrModelManager},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // .env sits below real environment variables and flags
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    tracing::info!("🚀 Starting {}", version::get_version_string());
    tracing::info!("Features: {}", version::FEATURES.join(", "));

    let layout = cli.layout_config();
    layout.validate().context("Invalid layout settings")?;

    let server = cli.server_config();
    let addr = server.socket_addr().context("Invalid bind address")?;

    tracing::info!(
        "Layout settings: blur kernel {}, canny {}/{}, binarize threshold {}",
        layout.blur_kernel_size,
        layout.canny_low,
        layout.canny_high,
        layout.binarize_threshold
    );

    // Model loading is blocking and happens once, before the listener binds
    let model_config = OcrModelConfig {
        model_dir: server.ocr_model_dir.clone(),
    };
    let models = tokio::task::spawn_blocking(move || OcrModelManager::new(model_config))
        .await
        .context("OCR model loading task failed")?;

    if !models.has_ocr() {
        tracing::warn!("⚠️ OCR unavailable; /convert-to-html will return 503 until a model is installed");
    }

    let state = AppState::new(&server, layout, &models);
    start_server(addr, state).await
}
