// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Conversion response types

use serde::{Deserialize, Serialize};

use crate::markup::Document;

/// Response from layout conversion: the assembled document and nothing else
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConvertResponse {
    pub html: String,
}

impl From<Document> for ConvertResponse {
    fn from(document: Document) -> Self {
        Self {
            html: document.into_html(),
        }
    }
}
