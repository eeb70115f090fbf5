// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Extracted elements and the assembled document

use serde::Serialize;

use crate::vision::layout::BoundingBox;

/// A detected region together with its recognized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedElement {
    /// Position in detection order (0-based)
    pub id: usize,
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
    /// Recognized text, `" "` when nothing was read
    pub text: String,
}

impl ExtractedElement {
    pub fn new(id: usize, bbox: BoundingBox, text: String) -> Self {
        Self { id, bbox, text }
    }

    /// DOM identifier of the element's block
    pub fn dom_id(&self) -> String {
        format!("element-{}", self.id)
    }
}

/// Assembled HTML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    html: String,
    element_count: usize,
}

impl Document {
    pub(crate) fn new(html: String, element_count: usize) -> Self {
        Self {
            html,
            element_count,
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    /// Number of positioned blocks inside the container
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    pub fn is_empty(&self) -> bool {
        self.element_count == 0
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.html)
    }
}
