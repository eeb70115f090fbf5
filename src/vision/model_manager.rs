// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR model manager: loads the text recognizer once at startup

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::vision::ocr::{PaddleRecognizer, TextRecognizer};

/// Configuration for loading the OCR model
#[derive(Debug, Clone)]
pub struct OcrModelConfig {
    /// Path to OCR model directory (optional)
    pub model_dir: Option<PathBuf>,
}

impl Default for OcrModelConfig {
    fn default() -> Self {
        Self {
            model_dir: Some(PathBuf::from(crate::config::DEFAULT_OCR_MODEL_DIR)),
        }
    }
}

/// Information about the loaded OCR model
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrModelInfo {
    /// Model name
    pub name: String,
    /// Whether the model is available
    pub available: bool,
}

/// Holder for the process-wide text recognizer
///
/// Built once before the server starts and shared read-only afterwards.
/// A missing or broken model directory is logged and leaves OCR unavailable
/// instead of aborting startup.
pub struct OcrModelManager {
    recognizer: Option<Arc<dyn TextRecognizer>>,
    name: String,
}

impl OcrModelManager {
    pub fn new(config: OcrModelConfig) -> Self {
        let recognizer: Option<Arc<dyn TextRecognizer>> = match config.model_dir {
            Some(ref dir) => match PaddleRecognizer::from_dir(dir) {
                Ok(model) => {
                    tracing::info!("✅ PaddleOCR recognizer loaded from {}", dir.display());
                    Some(Arc::new(model))
                }
                Err(e) => {
                    tracing::warn!(
                        "⚠️ Failed to load OCR model from {}: {:#}",
                        dir.display(),
                        e
                    );
                    None
                }
            },
            None => None,
        };

        Self {
            recognizer,
            name: "paddleocr".to_string(),
        }
    }

    /// Wrap an already constructed recognizer (alternate backends, tests)
    pub fn from_recognizer(name: impl Into<String>, recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self {
            recognizer: Some(recognizer),
            name: name.into(),
        }
    }

    /// Get the recognizer if available
    pub fn recognizer(&self) -> Option<Arc<dyn TextRecognizer>> {
        self.recognizer.clone()
    }

    pub fn has_ocr(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn model_info(&self) -> OcrModelInfo {
        OcrModelInfo {
            name: self.name.clone(),
            available: self.recognizer.is_some(),
        }
    }
}
