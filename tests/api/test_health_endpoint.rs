// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Tests for GET /health

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
};
use fabstir_layout_ocr::{
    api::{create_app, AppState, HealthResponse},
    version::VERSION,
};
use std::sync::Arc;
use tower::util::ServiceExt;

use crate::common::StubRecognizer;

async fn get_health(state: AppState) -> (StatusCode, HealthResponse) {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = create_app(Arc::new(state)).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_with_ocr() {
    let (status, health) =
        get_health(AppState::with_recognizer("stub", StubRecognizer::new(&[]))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(health.status, "ok");
    assert!(health.ocr_available);
    assert_eq!(health.version, VERSION);
}

#[tokio::test]
async fn test_health_without_ocr_still_ok() {
    let (status, health) = get_health(AppState::new_for_test()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!health.ocr_available);
}
