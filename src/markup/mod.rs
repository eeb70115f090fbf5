// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML reconstruction of detected regions
//!
//! Each extracted region becomes one absolutely positioned block whose
//! geometry mirrors its bounding box in the source image.

pub mod assembler;
pub mod element;

pub use assembler::MarkupAssembler;
pub use element::{Document, ExtractedElement};
