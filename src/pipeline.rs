// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image-to-HTML layout pipeline
//!
//! decoded image -> region detection -> per-region OCR (in detection order,
//! one region at a time) -> markup assembly.

use std::sync::Arc;
use std::time::Instant;

use image::RgbImage;
use tracing::{debug, info};

use crate::config::LayoutConfig;
use crate::markup::{Document, ExtractedElement, MarkupAssembler};
use crate::vision::image_utils::{decode_image_bytes, ImageError};
use crate::vision::layout::RegionDetector;
use crate::vision::ocr::{RegionOcrAdapter, TextRecognizer};

/// Reconstructs the textual layout of an image as positioned HTML
///
/// Holds no per-request state; one instance is shared by all requests.
#[derive(Debug, Clone)]
pub struct LayoutPipeline {
    detector: RegionDetector,
    ocr: RegionOcrAdapter,
    assembler: MarkupAssembler,
}

impl LayoutPipeline {
    pub fn new(config: LayoutConfig, recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self {
            detector: RegionDetector::new(config),
            ocr: RegionOcrAdapter::new(recognizer)
                .with_binarize_threshold(config.binarize_threshold),
            assembler: MarkupAssembler::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        self.detector.config()
    }

    /// Detect regions and read each one
    ///
    /// Returns exactly one element per detected region; element `id` equals
    /// its position in detection order.
    pub fn extract_elements(&self, image: &RgbImage) -> Vec<ExtractedElement> {
        let boxes = self.detector.detect(image);

        boxes
            .into_iter()
            .enumerate()
            .map(|(id, bbox)| {
                let text = self.ocr.extract_text(image, &bbox);
                debug!("Region {} at {:?}: {} chars", id, bbox, text.len());
                ExtractedElement::new(id, bbox, text)
            })
            .collect()
    }

    /// Run the full pipeline on a decoded image
    pub fn run(&self, image: &RgbImage) -> Document {
        let start = Instant::now();

        let elements = self.extract_elements(image);
        let document = self.assembler.assemble(&elements);

        info!(
            "Layout reconstructed: {} regions from {}x{} image in {}ms",
            document.element_count(),
            image.width(),
            image.height(),
            start.elapsed().as_millis()
        );

        document
    }

    /// Decode raw image bytes and run the full pipeline
    ///
    /// Only a decode failure is fatal; per-region OCR problems are absorbed.
    pub fn convert_bytes(&self, bytes: &[u8], max_bytes: usize) -> Result<Document, ImageError> {
        let (image, info) = decode_image_bytes(bytes, max_bytes)?;
        debug!(
            "Decoded image: {}x{}, {:?}, {} bytes",
            info.width, info.height, info.format, info.size_bytes
        );
        Ok(self.run(&image))
    }
}
