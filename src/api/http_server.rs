// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP surface: shared state, router and server loop

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::convert::convert_to_html_handler;
use crate::config::{LayoutConfig, ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};
use crate::pipeline::LayoutPipeline;
use crate::vision::{OcrModelInfo, OcrModelManager, TextRecognizer};

/// Extra room for multipart boundaries and part headers above the image limit
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// State shared by every request
///
/// Built once before the server starts; nothing in it is mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pipeline: Option<Arc<LayoutPipeline>>,
    pub ocr_info: OcrModelInfo,
    pub max_upload_bytes: usize,
    pub request_timeout: Option<Duration>,
}

impl AppState {
    pub fn new(server: &ServerConfig, layout: LayoutConfig, models: &OcrModelManager) -> Self {
        let pipeline = models
            .recognizer()
            .map(|recognizer| Arc::new(LayoutPipeline::new(layout, recognizer)));

        Self {
            pipeline,
            ocr_info: models.model_info(),
            max_upload_bytes: server.max_upload_bytes,
            request_timeout: server.request_timeout(),
        }
    }

    /// State backed by an explicit recognizer with default settings
    pub fn with_recognizer(name: &str, recognizer: Arc<dyn TextRecognizer>) -> Self {
        let models = OcrModelManager::from_recognizer(name, recognizer);
        Self::new(&ServerConfig::default(), LayoutConfig::default(), &models)
    }

    /// State with no OCR model loaded
    pub fn new_for_test() -> Self {
        Self {
            pipeline: None,
            ocr_info: OcrModelInfo {
                name: "paddleocr".to_string(),
                available: false,
            },
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            request_timeout: None,
        }
    }

    /// The layout pipeline, if an OCR model is available
    pub fn pipeline(&self) -> Option<Arc<LayoutPipeline>> {
        self.pipeline.clone()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub ocr_available: bool,
    pub version: String,
}

/// Build the router with all routes and layers
pub fn create_app(state: Arc<AppState>) -> Router {
    let body_limit = state
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health_handler))
        .route("/convert-to-html", post(convert_to_html_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until ctrl-c
pub async fn start_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = create_app(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("🚀 Layout server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down layout server");
        })
        .await?;

    Ok(())
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        ocr_available: state.ocr_info.available,
        version: crate::version::VERSION.to_string(),
    })
}
