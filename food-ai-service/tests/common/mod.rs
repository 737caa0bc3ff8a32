//! Test helpers for food-ai-service integration tests.
//!
//! Builds the router around a mock classifier and the shipped food metadata,
//! so no model file is needed.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use food_ai_service::config::{
    CatalogConfig, FoodAiConfig, HttpConfig, ModelConfig, ObservabilityConfig,
};
use food_ai_service::services::{Classifier, FoodCatalog, MockClassifier};
use food_ai_service::startup::{build_router, AppState};
use http_body_util::BodyExt;
use image::{ImageFormat, Rgb, RgbImage};
use service_core::config::Config;
use std::io::Cursor;
use std::sync::Arc;
use tower::ServiceExt;

pub const FOOD_INFO_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/food_info.json");

pub fn test_config() -> FoodAiConfig {
    FoodAiConfig {
        common: Config { port: 0 },
        model: ModelConfig {
            path: "unused.onnx".to_string(),
            input_size: 8,
            confidence_threshold: 0.5,
            top_k: 3,
        },
        catalog: CatalogConfig {
            path: FOOD_INFO_PATH.to_string(),
        },
        http: HttpConfig {
            max_body_bytes: 1024 * 1024,
        },
        observability: ObservabilityConfig {
            log_level: "info".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub fn app_with(classifier: MockClassifier) -> Router {
    let catalog = FoodCatalog::load(FOOD_INFO_PATH).expect("Failed to load food metadata");
    let classifier: Arc<dyn Classifier> = Arc::new(classifier);
    build_router(AppState::new(test_config(), catalog, classifier))
}

pub fn app() -> Router {
    app_with(MockClassifier::confident("jollof_rice", 0.92))
}

pub fn png_payload() -> String {
    let img = RgbImage::from_pixel(16, 16, Rgb([200, 120, 40]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("Failed to encode PNG");
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read(response).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read(response).await
}

async fn read(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}
