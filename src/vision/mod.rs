// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing for layout reconstruction
//!
//! This module provides:
//! - Decoding of uploaded image bytes
//! - Layout segmentation into ordered text-region boxes
//! - Per-region OCR via a pluggable text recognizer (PaddleOCR on CPU by default)

pub mod image_utils;
pub mod layout;
pub mod model_manager;
pub mod ocr;

pub use image_utils::{decode_image_bytes, detect_format, ImageError, ImageInfo};
pub use layout::{BoundingBox, RegionDetector};
pub use model_manager::{OcrModelConfig, OcrModelInfo, OcrModelManager};
pub use ocr::{OcrError, RegionOcrAdapter, TextRecognizer, PLACEHOLDER_TEXT};
