// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-region text extraction

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use image::RgbImage;
use tracing::{debug, warn};

use super::preprocessing::{binarize, crop_region};
use super::{OcrError, TextRecognizer};
use crate::config::DEFAULT_BINARIZE_THRESHOLD;
use crate::vision::layout::BoundingBox;

/// Text emitted for a region with no recoverable text
pub const PLACEHOLDER_TEXT: &str = " ";

/// Crops, binarizes and reads one region at a time
///
/// Never fails: empty crops, empty results and recognizer errors all map to
/// `PLACEHOLDER_TEXT` so one bad region cannot sink the whole document.
#[derive(Clone)]
pub struct RegionOcrAdapter {
    recognizer: Arc<dyn TextRecognizer>,
    binarize_threshold: u8,
}

impl std::fmt::Debug for RegionOcrAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionOcrAdapter")
            .field("binarize_threshold", &self.binarize_threshold)
            .finish_non_exhaustive()
    }
}

impl RegionOcrAdapter {
    pub fn new(recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self {
            recognizer,
            binarize_threshold: DEFAULT_BINARIZE_THRESHOLD,
        }
    }

    pub fn with_binarize_threshold(mut self, level: u8) -> Self {
        self.binarize_threshold = level;
        self
    }

    pub fn binarize_threshold(&self) -> u8 {
        self.binarize_threshold
    }

    /// Extract the text inside `bbox`
    ///
    /// Always returns a non-empty string; the minimum is `" "`.
    pub fn extract_text(&self, image: &RgbImage, bbox: &BoundingBox) -> String {
        let Some(crop) = crop_region(image, bbox) else {
            debug!("Region {:?} lies outside the image, skipping OCR", bbox);
            return PLACEHOLDER_TEXT.to_string();
        };

        let binary = binarize(&crop, self.binarize_threshold);

        // A panicking backend is treated like any other per-region failure
        let result = catch_unwind(AssertUnwindSafe(|| self.recognizer.recognize(&binary)))
            .unwrap_or_else(|_| Err(OcrError::Inference("recognizer panicked".to_string())));

        match result {
            Ok(tokens) => join_tokens(&tokens),
            Err(e) => {
                warn!("OCR failed for region {:?}: {}", bbox, e);
                PLACEHOLDER_TEXT.to_string()
            }
        }
    }
}

/// Join recognized tokens with single spaces, falling back to the placeholder
fn join_tokens(tokens: &[String]) -> String {
    let words: Vec<&str> = tokens
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();

    if words.is_empty() {
        PLACEHOLDER_TEXT.to_string()
    } else {
        words.join(" ")
    }
}
