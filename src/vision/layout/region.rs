// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Axis-aligned bounding boxes for candidate text regions

use imageproc::point::Point;
use serde::{Deserialize, Serialize};

/// Bounding box of a candidate text region, in pixel coordinates
///
/// `width` and `height` are always at least 1 for boxes produced by the
/// detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest box containing every point (inclusive pixel extent)
    ///
    /// Returns `None` for an empty point set.
    pub fn enclosing(points: &[Point<u32>]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut max_x) = (first.x, first.x);
        let (mut min_y, mut max_y) = (first.y, first.y);

        for p in &points[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        Some(Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    /// Exclusive right edge
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Intersection of this box with a `width` x `height` image
    ///
    /// Returns `None` when the box lies entirely outside the image or has
    /// no area.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Self> {
        if self.width == 0 || self.height == 0 || self.x >= width || self.y >= height {
            return None;
        }

        let right = self.right().min(width as u64) as u32;
        let bottom = self.bottom().min(height as u64) as u32;

        Some(Self::new(self.x, self.y, right - self.x, bottom - self.y))
    }
}
