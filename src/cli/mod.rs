// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Command-line and environment settings for the layout server

use clap::Parser;
use std::path::PathBuf;

use crate::config::{
    LayoutConfig, ServerConfig, DEFAULT_BINARIZE_THRESHOLD, DEFAULT_BLUR_KERNEL_SIZE,
    DEFAULT_CANNY_HIGH, DEFAULT_CANNY_LOW, DEFAULT_HOST, DEFAULT_MAX_UPLOAD_BYTES,
    DEFAULT_OCR_MODEL_DIR, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Fabstir layout OCR server
///
/// Every flag can also be set through the environment variable shown in
/// `--help`; flags win over the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "fabstir-layout-ocr")]
#[command(version = crate::version::VERSION)]
#[command(about = "Reconstruct the text layout of an image as positioned HTML", long_about = None)]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "LAYOUT_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "LAYOUT_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory containing the OCR recognition model and dictionary
    #[arg(long, env = "OCR_MODEL_DIR", default_value = DEFAULT_OCR_MODEL_DIR)]
    pub ocr_model_dir: PathBuf,

    /// Largest accepted image upload in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Per-request processing timeout in seconds (0 disables)
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    /// Gaussian blur kernel size (odd)
    #[arg(long, env = "BLUR_KERNEL_SIZE", default_value_t = DEFAULT_BLUR_KERNEL_SIZE)]
    pub blur_kernel_size: u32,

    /// Canny lower hysteresis threshold
    #[arg(long, env = "CANNY_LOW", default_value_t = DEFAULT_CANNY_LOW)]
    pub canny_low: f32,

    /// Canny upper hysteresis threshold
    #[arg(long, env = "CANNY_HIGH", default_value_t = DEFAULT_CANNY_HIGH)]
    pub canny_high: f32,

    /// Binarization threshold applied to crops before OCR
    #[arg(long, env = "BINARIZE_THRESHOLD", default_value_t = DEFAULT_BINARIZE_THRESHOLD)]
    pub binarize_threshold: u8,
}

impl Cli {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            ocr_model_dir: Some(self.ocr_model_dir.clone()),
            max_upload_bytes: self.max_upload_bytes,
            request_timeout_secs: self.request_timeout_secs,
        }
    }

    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            blur_kernel_size: self.blur_kernel_size,
            canny_low: self.canny_low,
            canny_high: self.canny_high,
            binarize_threshold: self.binarize_threshold,
        }
    }
}
