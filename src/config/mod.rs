// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Runtime configuration for the layout service
//!
//! Two groups of settings:
//! - `LayoutConfig` - tunable thresholds used by region detection and OCR binarization
//! - `ServerConfig` - bind address, model location and request limits
//!
//! Defaults match the values the detector was tuned with. Every value can be
//! overridden through the environment or the command line (see `cli`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default Gaussian blur kernel size (5x5)
pub const DEFAULT_BLUR_KERNEL_SIZE: u32 = 5;

/// Default lower hysteresis threshold for Canny edge detection
pub const DEFAULT_CANNY_LOW: f32 = 50.0;

/// Default upper hysteresis threshold for Canny edge detection
pub const DEFAULT_CANNY_HIGH: f32 = 150.0;

/// Default global binarization threshold (pixels above become white)
pub const DEFAULT_BINARIZE_THRESHOLD: u8 = 150;

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_PORT: u16 = 5001;

/// Default OCR model directory
pub const DEFAULT_OCR_MODEL_DIR: &str = "./models/paddleocr-onnx";

/// Maximum upload size (10MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default per-request processing timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("blur kernel size must be odd and at least 1, got {0}")]
    InvalidKernelSize(u32),

    #[error("canny thresholds must satisfy 0 <= low <= high, got low={low} high={high}")]
    InvalidCannyThresholds { low: f32, high: f32 },

    #[error("invalid bind address {0}")]
    InvalidAddress(String),
}

/// Thresholds for layout detection and region binarization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Side length of the square Gaussian kernel applied before edge detection
    pub blur_kernel_size: u32,
    /// Canny lower hysteresis threshold
    pub canny_low: f32,
    /// Canny upper hysteresis threshold
    pub canny_high: f32,
    /// Grayscale level above which a cropped pixel becomes white (255)
    pub binarize_threshold: u8,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            blur_kernel_size: DEFAULT_BLUR_KERNEL_SIZE,
            canny_low: DEFAULT_CANNY_LOW,
            canny_high: DEFAULT_CANNY_HIGH,
            binarize_threshold: DEFAULT_BINARIZE_THRESHOLD,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
            return Err(ConfigError::InvalidKernelSize(self.blur_kernel_size));
        }
        if self.canny_low < 0.0 || self.canny_low > self.canny_high {
            return Err(ConfigError::InvalidCannyThresholds {
                low: self.canny_low,
                high: self.canny_high,
            });
        }
        Ok(())
    }

    /// Gaussian sigma for the configured kernel size
    ///
    /// Uses the same derivation a zero-sigma Gaussian blur applies:
    /// `0.3 * ((k - 1) * 0.5 - 1) + 0.8`, which is 1.1 for a 5x5 kernel.
    pub fn blur_sigma(&self) -> f32 {
        let k = self.blur_kernel_size.max(1) as f32;
        (0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8).max(0.1)
    }
}

/// Process-level settings for the HTTP service
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `rec_model.onnx` and `ppocr_keys_v1.txt`
    pub ocr_model_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
    /// 0 disables the timeout
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            ocr_model_dir: Some(PathBuf::from(DEFAULT_OCR_MODEL_DIR)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
