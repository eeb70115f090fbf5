// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Layout segmentation: turns a decoded image into ordered text-region boxes
//!
//! Components:
//! - `region` - `BoundingBox` geometry
//! - `detection` - blur / Canny / external-contour region detector

pub mod detection;
pub mod region;

pub use detection::RegionDetector;
pub use region::BoundingBox;
