// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod markup;
pub mod pipeline;
pub mod version;
pub mod vision;

pub use config::{LayoutConfig, ServerConfig};
pub use markup::{Document, ExtractedElement, MarkupAssembler};
pub use pipeline::LayoutPipeline;
pub use vision::{BoundingBox, RegionDetector, RegionOcrAdapter, TextRecognizer};
