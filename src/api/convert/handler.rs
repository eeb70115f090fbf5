// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Conversion endpoint handler

use std::sync::Arc;

use axum::{extract::State, Json};
use axum_extra::extract::{Multipart, WithRejection};
use tracing::{debug, info, warn};

use super::response::ConvertResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::vision::decode_image_bytes;

/// Multipart field carrying the uploaded image
pub const FILE_FIELD: &str = "file";

/// POST /convert-to-html - Reconstruct an image's text layout as HTML
///
/// # Request
/// `multipart/form-data` with the image in the `file` field (any field with a
/// filename is accepted when no `file` field is present). PNG, JPEG, WebP,
/// GIF, BMP and TIFF are supported.
///
/// # Response
/// - `html`: the assembled document, one positioned block per detected region
///
/// # Errors
/// - 400 Bad Request: not multipart, no file, or bytes are not a decodable image
/// - 413 Payload Too Large: upload exceeds the configured limit
/// - 503 Service Unavailable: OCR model not loaded
/// - 504 Gateway Timeout: processing exceeded the configured timeout
pub async fn convert_to_html_handler(
    State(state): State<Arc<AppState>>,
    WithRejection(multipart, _): WithRejection<Multipart, ApiError>,
) -> Result<Json<ConvertResponse>, ApiError> {
    // 1. Read the uploaded file
    let bytes = read_upload(multipart).await.map_err(|e| {
        warn!("Rejected upload: {}", e);
        e
    })?;

    // 2. Decode
    let (image, image_info) = decode_image_bytes(&bytes, state.max_upload_bytes).map_err(|e| {
        warn!("Failed to decode image: {}", e);
        ApiError::from(e)
    })?;

    debug!(
        "Decoded image: {}x{}, {} bytes",
        image_info.width, image_info.height, image_info.size_bytes
    );

    // 3. Pipeline (requires the OCR model)
    let pipeline = state.pipeline().ok_or_else(|| {
        warn!("OCR model not loaded");
        ApiError::ServiceUnavailable("OCR model not loaded".to_string())
    })?;

    // 4. Detection and inference are CPU-bound; keep them off the async workers
    let task = tokio::task::spawn_blocking(move || pipeline.run(&image));

    let joined = match state.request_timeout {
        Some(limit) => tokio::time::timeout(limit, task).await.map_err(|_| {
            warn!("Layout conversion exceeded {:?}", limit);
            ApiError::Timeout
        })?,
        None => task.await,
    };

    let document = joined.map_err(|e| {
        warn!("Layout task failed: {}", e);
        ApiError::InternalError("Layout processing failed".to_string())
    })?;

    info!(
        "Converted {}x{} image into {} positioned elements",
        image_info.width,
        image_info.height,
        document.element_count()
    );

    Ok(Json(ConvertResponse::from(document)))
}

/// Pull the image bytes out of the multipart body
///
/// Prefers the `file` field; otherwise takes the first field that carries a
/// filename.
async fn read_upload(mut multipart: Multipart) -> Result<Vec<u8>, ApiError> {
    let mut fallback: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await? {
        let is_file_field = field.name() == Some(FILE_FIELD);
        let has_filename = field.file_name().is_some();

        if is_file_field {
            return Ok(field.bytes().await?.to_vec());
        }

        if has_filename && fallback.is_none() {
            fallback = Some(field.bytes().await?.to_vec());
        }
    }

    fallback.ok_or_else(|| ApiError::ValidationError {
        field: FILE_FIELD.to_string(),
        message: "file is required".to_string(),
    })
}
