// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Region OCR: text extraction for detected layout regions
//!
//! Components:
//! - `adapter` - crops, binarizes and reads a single region (`RegionOcrAdapter`)
//! - `preprocessing` - crop clamping, binarization and recognition tensors
//! - `recognition` - PaddleOCR recognition model (ONNX, CPU-only)
//!
//! The recognizer is consumed through the `TextRecognizer` capability so the
//! pipeline never depends on a concrete OCR backend.

pub mod adapter;
pub mod preprocessing;
pub mod recognition;

use image::GrayImage;
use thiserror::Error;

pub use adapter::{RegionOcrAdapter, PLACEHOLDER_TEXT};
pub use recognition::PaddleRecognizer;

/// Failures reported by an OCR backend for a single crop
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("input image is empty")]
    EmptyInput,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

/// Text-from-pixels capability
///
/// Implementations are shared across concurrent requests, so they must be
/// safe to call from several threads at once (serializing internally if
/// the underlying model requires it).
#[cfg_attr(test, mockall::automock)]
pub trait TextRecognizer: Send + Sync {
    /// Recognize the text tokens in a binarized crop, in reading order
    fn recognize(&self, image: &GrayImage) -> Result<Vec<String>, OcrError>;
}
