// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for region OCR

use image::{imageops, GrayImage, RgbImage};
use imageproc::contrast::{threshold, ThresholdType};
use ndarray::Array4;

use crate::vision::layout::BoundingBox;

/// Recognition model input height (PP-OCRv5 English model uses 48)
pub const REC_INPUT_HEIGHT: u32 = 48;

/// Maximum width for recognition model input
pub const REC_MAX_WIDTH: u32 = 320;

/// Minimum width for recognition model input
pub const REC_MIN_WIDTH: u32 = 4;

/// PaddleOCR recognition normalization: (pixel / 255 - 0.5) / 0.5
const REC_MEAN: f32 = 0.5;
const REC_STD: f32 = 0.5;

/// Crop `bbox` out of `image`, clamped to the image bounds
///
/// Returns `None` when the box does not intersect the image at all.
pub fn crop_region(image: &RgbImage, bbox: &BoundingBox) -> Option<RgbImage> {
    let clamped = bbox.clamp_to(image.width(), image.height())?;
    Some(
        imageops::crop_imm(
            image,
            clamped.x,
            clamped.y,
            clamped.width,
            clamped.height,
        )
        .to_image(),
    )
}

/// Grayscale + fixed global threshold
///
/// Pixels brighter than `level` become 255, everything else 0. Polarity is
/// kept as-is (no inversion).
pub fn binarize(crop: &RgbImage, level: u8) -> GrayImage {
    let gray = imageops::grayscale(crop);
    threshold(&gray, level, ThresholdType::Binary)
}

/// Preprocess a binarized crop for the recognition model
///
/// Steps:
/// 1. Resize to height 48, dynamic width (aspect ratio preserved, 4..=320)
/// 2. Replicate the single channel into three
/// 3. Normalize to [-1, 1]
/// 4. NCHW tensor [1, 3, 48, W]
pub fn preprocess_for_recognition(image: &GrayImage) -> Array4<f32> {
    let (orig_w, orig_h) = image.dimensions();

    let scale = REC_INPUT_HEIGHT as f32 / orig_h.max(1) as f32;
    let new_width = ((orig_w as f32 * scale).round() as u32).clamp(REC_MIN_WIDTH, REC_MAX_WIDTH);

    let resized = imageops::resize(
        image,
        new_width,
        REC_INPUT_HEIGHT,
        imageops::FilterType::Lanczos3,
    );

    let output_width = new_width as usize;
    let mut tensor = Array4::zeros((1, 3, REC_INPUT_HEIGHT as usize, output_width));

    for y in 0..REC_INPUT_HEIGHT as usize {
        for x in 0..output_width {
            let value = resized.get_pixel(x as u32, y as u32)[0] as f32;
            let normalized = (value / 255.0 - REC_MEAN) / REC_STD;
            for c in 0..3 {
                tensor[[0, c, y, x]] = normalized;
            }
        }
    }

    tensor
}
