// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Tests for POST /convert-to-html
//!
//! The router is driven in-process with `oneshot`; OCR is served by stub
//! recognizers so no model files are needed.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use fabstir_layout_ocr::{
    api::{create_app, AppState, ConvertResponse, ErrorResponse},
    config::{LayoutConfig, ServerConfig},
    vision::OcrModelManager,
};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use crate::common::{
    black_image, encode_png, multipart_body, multipart_content_type, single_block_image,
    two_block_image, FailingRecognizer, StubRecognizer,
};

fn app_with(state: AppState) -> Router {
    create_app(Arc::new(state))
}

fn upload(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/convert-to-html")
        .header(header::CONTENT_TYPE, multipart_content_type())
        .body(Body::from(body))
        .unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_black_image_returns_document_without_elements() {
    let stub = StubRecognizer::new(&["unused"]);
    let app = app_with(AppState::with_recognizer("stub", stub.clone()));

    let png = encode_png(&black_image(100, 100));
    let response = app
        .oneshot(upload(multipart_body("file", Some("black.png"), &png)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: ConvertResponse = read_json(response).await;
    assert!(body.html.contains("<div class='container'>"));
    assert!(!body.html.contains("class='element'"));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_single_block_becomes_one_element() {
    let stub = StubRecognizer::new(&["HELLO"]);
    let app = app_with(AppState::with_recognizer("stub", stub.clone()));

    let png = encode_png(&single_block_image());
    let response = app
        .oneshot(upload(multipart_body("file", Some("hello.png"), &png)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: ConvertResponse = read_json(response).await;
    assert_eq!(body.html.matches("class='element'").count(), 1);
    assert!(body.html.contains("id='element-0'"));
    assert!(body.html.contains(">HELLO</div>"));
    assert!(!body.html.contains("element-1"));
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_elements_follow_vertical_order() {
    let stub = StubRecognizer::new(&["line"]);
    let app = app_with(AppState::with_recognizer("stub", stub));

    let png = encode_png(&two_block_image());
    let response = app
        .oneshot(upload(multipart_body("file", Some("two.png"), &png)))
        .await
        .unwrap();

    let body: ConvertResponse = read_json(response).await;
    let first = body.html.find("id='element-0'").unwrap();
    let second = body.html.find("id='element-1'").unwrap();
    assert!(first < second);

    // The upper block (y = 20) is emitted first even though it was drawn last
    let first_line = body.html[..first].rsplit('\n').next().unwrap();
    assert!(top_of(first_line) < 60, "got: {}", first_line);
}

fn top_of(element_line: &str) -> u32 {
    let start = element_line.find("top: ").unwrap() + "top: ".len();
    let end = start + element_line[start..].find("px").unwrap();
    element_line[start..end].parse().unwrap()
}

#[tokio::test]
async fn test_ocr_failure_yields_placeholder_not_error() {
    let app = app_with(AppState::with_recognizer(
        "failing",
        Arc::new(FailingRecognizer),
    ));

    let png = encode_png(&single_block_image());
    let response = app
        .oneshot(upload(multipart_body("file", Some("hello.png"), &png)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: ConvertResponse = read_json(response).await;
    assert_eq!(body.html.matches("class='element'").count(), 1);
    assert!(body.html.contains("id='element-0'>&#32;</div>"));
}

#[tokio::test]
async fn test_same_image_twice_gives_identical_html() {
    let stub = StubRecognizer::new(&["same", "text"]);
    let app = app_with(AppState::with_recognizer("stub", stub));
    let png = encode_png(&two_block_image());

    let first = app
        .clone()
        .oneshot(upload(multipart_body("file", Some("a.png"), &png)))
        .await
        .unwrap();
    let second = app
        .oneshot(upload(multipart_body("file", Some("a.png"), &png)))
        .await
        .unwrap();

    let first: ConvertResponse = read_json(first).await;
    let second: ConvertResponse = read_json(second).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_field_with_filename_is_accepted() {
    let stub = StubRecognizer::new(&["HELLO"]);
    let app = app_with(AppState::with_recognizer("stub", stub));

    let png = encode_png(&single_block_image());
    let response = app
        .oneshot(upload(multipart_body("image", Some("hello.png"), &png)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_garbage_bytes_rejected() {
    let stub = StubRecognizer::new(&["unused"]);
    let app = app_with(AppState::with_recognizer("stub", stub.clone()));

    let response = app
        .oneshot(upload(multipart_body(
            "file",
            Some("notes.txt"),
            b"this is not an image at all",
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error_type, "validation_error");
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_empty_file_rejected() {
    let app = app_with(AppState::with_recognizer("stub", StubRecognizer::new(&[])));

    let response = app
        .oneshot(upload(multipart_body("file", Some("empty.png"), &[])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_file_field_rejected() {
    let app = app_with(AppState::with_recognizer("stub", StubRecognizer::new(&[])));

    let response = app
        .oneshot(upload(multipart_body("comment", None, b"hello")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert!(error.message.contains("file"));
}

#[tokio::test]
async fn test_non_multipart_request_rejected() {
    let app = app_with(AppState::with_recognizer("stub", StubRecognizer::new(&[])));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/convert-to-html")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"image":"abc"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_no_ocr_model_returns_503() {
    let app = app_with(AppState::new_for_test());

    let png = encode_png(&single_block_image());
    let response = app
        .oneshot(upload(multipart_body("file", Some("hello.png"), &png)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error_type, "service_unavailable");
}

#[tokio::test]
async fn test_image_over_upload_limit_returns_413() {
    let server = ServerConfig {
        max_upload_bytes: 64,
        ..ServerConfig::default()
    };
    let models = OcrModelManager::from_recognizer("stub", StubRecognizer::new(&[]));
    let app = app_with(AppState::new(&server, LayoutConfig::default(), &models));

    let png = encode_png(&single_block_image());
    assert!(png.len() > 64);

    let response = app
        .oneshot(upload(multipart_body("file", Some("hello.png"), &png)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_body_over_transport_limit_returns_413() {
    let server = ServerConfig {
        max_upload_bytes: 16,
        ..ServerConfig::default()
    };
    let models = OcrModelManager::from_recognizer("stub", StubRecognizer::new(&[]));
    let app = app_with(AppState::new(&server, LayoutConfig::default(), &models));

    let oversized = vec![0u8; 256 * 1024];
    let response = app
        .oneshot(upload(multipart_body("file", Some("big.bin"), &oversized)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_get_not_allowed() {
    let app = app_with(AppState::new_for_test());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/convert-to-html")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
