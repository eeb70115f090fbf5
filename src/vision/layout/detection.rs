// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Edge-based text region detection
//!
//! Pipeline:
//! 1. Grayscale (weighted luminance)
//! 2. Gaussian blur with the configured kernel
//! 3. Canny edge detection with hysteresis thresholds
//! 4. External contours only (nested contours are folded into their outer silhouette)
//! 5. Axis-aligned bounding box per contour
//! 6. Ascending sort by top edge (reading-order approximation)

use image::RgbImage;
use imageproc::contours::{find_contours, BorderType};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use tracing::debug;

use super::region::BoundingBox;
use crate::config::LayoutConfig;

/// Detects candidate text regions in an image
#[derive(Debug, Clone, Default)]
pub struct RegionDetector {
    config: LayoutConfig,
}

impl RegionDetector {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Find candidate text regions, ordered top to bottom
    ///
    /// Never fails. An image without edges (e.g. a uniform color) yields an
    /// empty vector. Boxes sharing the same `y` keep contour discovery order;
    /// no secondary key is applied.
    pub fn detect(&self, image: &RgbImage) -> Vec<BoundingBox> {
        if image.width() == 0 || image.height() == 0 {
            return Vec::new();
        }

        let gray = image::imageops::grayscale(image);
        let blurred = gaussian_blur_f32(&gray, self.config.blur_sigma());
        // canny asserts low <= high; an unvalidated config must not panic here
        let low = self.config.canny_low.min(self.config.canny_high);
        let high = self.config.canny_low.max(self.config.canny_high);
        let edges = canny(&blurred, low, high);

        let contours = find_contours::<u32>(&edges);
        let total = contours.len();

        let mut boxes: Vec<BoundingBox> = contours
            .iter()
            .filter(|c| c.parent.is_none() && c.border_type == BorderType::Outer)
            .filter_map(|c| BoundingBox::enclosing(&c.points))
            .collect();

        boxes.sort_by_key(|b| b.y);

        debug!(
            "Detected {} external regions ({} contours total) in {}x{} image",
            boxes.len(),
            total,
            image.width(),
            image.height()
        );

        boxes
    }
}
