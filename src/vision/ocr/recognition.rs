// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PaddleOCR text recognition model
//!
//! Recognizes the text content of a binarized region crop. This is the
//! production `TextRecognizer` backend; the layout pipeline only ever sees
//! the trait.

use anyhow::{Context, Result};
use image::GrayImage;
use ndarray::{ArrayViewD, IxDyn};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::preprocessing::{preprocess_for_recognition, REC_INPUT_HEIGHT};
use super::{OcrError, TextRecognizer};

/// Model file expected inside the OCR model directory
pub const REC_MODEL_FILE: &str = "rec_model.onnx";

/// Character dictionary expected inside the OCR model directory
pub const REC_DICT_FILE: &str = "ppocr_keys_v1.txt";

/// PaddleOCR text recognition model
///
/// Runs on CPU. The ONNX session sits behind a mutex, so concurrent requests
/// share one loaded model and take turns on inference.
#[derive(Clone)]
pub struct PaddleRecognizer {
    /// ONNX Runtime session (thread-safe)
    session: Arc<Mutex<Session>>,
    /// Character dictionary for CTC decoding (index 0 is the blank)
    dictionary: Arc<Vec<char>>,
    /// Model input name
    input_name: String,
}

impl std::fmt::Debug for PaddleRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaddleRecognizer")
            .field("dictionary_size", &self.dictionary.len())
            .field("input_name", &self.input_name)
            .finish_non_exhaustive()
    }
}

impl PaddleRecognizer {
    /// Load the recognition model and dictionary from a model directory
    ///
    /// Expected files:
    /// - rec_model.onnx (text recognition)
    /// - ppocr_keys_v1.txt (character dictionary)
    pub fn from_dir<P: AsRef<Path>>(model_dir: P) -> Result<Self> {
        let dir = model_dir.as_ref();
        Self::new(dir.join(REC_MODEL_FILE), dir.join(REC_DICT_FILE))
    }

    /// Load the recognition model from explicit file paths
    ///
    /// # Errors
    /// Returns error if:
    /// - Model or dictionary file not found
    /// - ONNX Runtime initialization fails
    pub fn new<P: AsRef<Path>>(model_path: P, dict_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();
        let dict_path = dict_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("OCR recognition model not found: {}", model_path.display());
        }
        if !dict_path.exists() {
            anyhow::bail!(
                "OCR character dictionary not found: {}",
                dict_path.display()
            );
        }

        info!(
            "Loading OCR recognition model from {}",
            model_path.display()
        );

        let dictionary = load_dictionary(dict_path)?;
        info!(
            "Loaded character dictionary with {} characters",
            dictionary.len()
        );

        // CPU-only execution
        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(4)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load OCR recognition model from {}",
                model_path.display()
            ))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .unwrap_or_else(|| "x".to_string());

        debug!("Recognition model loaded - input: {}", input_name);
        info!("OCR recognition model loaded (CPU-only)");

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            dictionary: Arc::new(dictionary),
            input_name,
        })
    }

    pub fn dictionary_size(&self) -> usize {
        self.dictionary.len()
    }

    fn run(&self, image: &GrayImage) -> Result<String, OcrError> {
        let input = preprocess_for_recognition(image);

        let shape = input.shape();
        if shape[2] != REC_INPUT_HEIGHT as usize {
            return Err(OcrError::InvalidInput(format!(
                "unexpected tensor shape {:?}",
                shape
            )));
        }

        let input_value =
            Tensor::from_array(input).map_err(|e| OcrError::InvalidInput(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| OcrError::Inference("recognition session lock poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![&self.input_name => input_value])
            .map_err(|e| OcrError::Inference(e.to_string()))?;

        let output_tensor = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| OcrError::Inference(e.to_string()))?;

        debug!("Recognition output shape: {:?}", output_tensor.shape());

        ctc_decode(&output_tensor, &self.dictionary)
    }
}

impl TextRecognizer for PaddleRecognizer {
    fn recognize(&self, image: &GrayImage) -> Result<Vec<String>, OcrError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(OcrError::EmptyInput);
        }

        let text = self.run(image)?;
        Ok(text.split_whitespace().map(str::to_string).collect())
    }
}

/// Load character dictionary from file
///
/// Each line in the file contains one character. Index 0 is reserved for
/// the CTC blank; a trailing space class is appended when missing.
pub fn load_dictionary<P: AsRef<Path>>(path: P) -> Result<Vec<char>> {
    let file = File::open(path.as_ref()).context(format!(
        "Failed to open dictionary: {}",
        path.as_ref().display()
    ))?;

    let reader = BufReader::new(file);
    let mut dictionary = vec!['\0'];

    for line in reader.lines() {
        let line = line.context("Failed to read dictionary line")?;
        if let Some(ch) = line.chars().next() {
            dictionary.push(ch);
        }
    }

    if !dictionary.contains(&' ') {
        dictionary.push(' ');
    }

    Ok(dictionary)
}

/// CTC greedy decoding (best path with blank removal and repeat collapse)
///
/// Accepts `[batch, seq_len, num_classes]` or `[seq_len, num_classes]`.
pub fn ctc_decode(output: &ArrayViewD<f32>, dictionary: &[char]) -> Result<String, OcrError> {
    let output_shape = output.shape();
    let batched = output_shape.len() == 3;

    let (seq_len, num_classes) = match output_shape.len() {
        3 => (output_shape[1], output_shape[2]),
        2 => (output_shape[0], output_shape[1]),
        _ => {
            return Err(OcrError::Inference(format!(
                "unexpected output shape: {:?}",
                output_shape
            )))
        }
    };

    let mut text = String::new();
    let mut prev_index: Option<usize> = None;

    for t in 0..seq_len {
        let mut max_prob = f32::NEG_INFINITY;
        let mut max_index = 0usize;

        for c in 0..num_classes {
            let prob = if batched {
                output[IxDyn(&[0, t, c])]
            } else {
                output[IxDyn(&[t, c])]
            };

            if prob > max_prob {
                max_prob = prob;
                max_index = c;
            }
        }

        if max_index != 0 && Some(max_index) != prev_index {
            if let Some(&ch) = dictionary.get(max_index) {
                text.push(ch);
            }
        }

        prev_index = if max_index == 0 { None } else { Some(max_index) };
    }

    Ok(text)
}
