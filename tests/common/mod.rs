// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Shared helpers for integration tests

#![allow(dead_code)]

use fabstir_layout_ocr::vision::{OcrError, TextRecognizer};
use image::{DynamicImage, GrayImage, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const BOUNDARY: &str = "layout-test-boundary";

/// Recognizer that answers every crop with the same tokens and counts calls
#[derive(Debug)]
pub struct StubRecognizer {
    tokens: Vec<String>,
    calls: AtomicUsize,
}

impl StubRecognizer {
    pub fn new(tokens: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextRecognizer for StubRecognizer {
    fn recognize(&self, _image: &GrayImage) -> Result<Vec<String>, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tokens.clone())
    }
}

/// Recognizer that always fails
#[derive(Debug, Default)]
pub struct FailingRecognizer;

impl TextRecognizer for FailingRecognizer {
    fn recognize(&self, _image: &GrayImage) -> Result<Vec<String>, OcrError> {
        Err(OcrError::Inference("model exploded".to_string()))
    }
}

pub fn encode_png(img: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

pub fn black_image(width: u32, height: u32) -> RgbImage {
    RgbImage::new(width, height)
}

/// Black canvas with one white block, like a single line of text
pub fn single_block_image() -> RgbImage {
    let mut img = RgbImage::new(200, 100);
    draw_filled_rect_mut(
        &mut img,
        Rect::at(40, 30).of_size(120, 30),
        Rgb([255, 255, 255]),
    );
    img
}

/// Black canvas with two separated white blocks, the lower one drawn first
pub fn two_block_image() -> RgbImage {
    let mut img = RgbImage::new(240, 200);
    draw_filled_rect_mut(
        &mut img,
        Rect::at(30, 130).of_size(150, 30),
        Rgb([255, 255, 255]),
    );
    draw_filled_rect_mut(
        &mut img,
        Rect::at(20, 20).of_size(100, 40),
        Rgb([255, 255, 255]),
    );
    img
}

/// Single-part multipart/form-data body
pub fn multipart_body(field: &str, filename: Option<&str>, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    match filename {
        Some(name) => body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, name
            )
            .as_bytes(),
        ),
        None => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n", field).as_bytes(),
        ),
    }
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
