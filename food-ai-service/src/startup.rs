//! Application startup and lifecycle management.
//!
//! The model and the food metadata are loaded once here into an immutable
//! [`AppState`] that every handler shares.

use crate::config::FoodAiConfig;
use crate::handlers::{
    advise, analyze_food, health_check, list_foods, metrics, readiness_check, root,
};
use crate::services::classifier::{self, default_labels, Classifier, OnnxClassifier};
use crate::services::FoodCatalog;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FoodAiConfig>,
    pub catalog: Arc<FoodCatalog>,
    pub classifier: Arc<dyn Classifier>,
}

impl AppState {
    pub fn new(config: FoodAiConfig, catalog: FoodCatalog, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            classifier,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config.http.max_body_bytes;

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .route("/foods", get(list_foods))
        .route("/advice", post(advise))
        .route("/analyze", post(analyze_food))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Outermost so the trace span sees the generated request id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application, loading the ONNX model and food metadata
    /// named by `config`.
    pub async fn build(config: FoodAiConfig) -> Result<Self, AppError> {
        let model_path = config.model.path.clone();
        let input_size = config.model.input_size;

        let classifier = tokio::task::spawn_blocking(move || {
            let onnx = OnnxClassifier::load(&model_path, input_size, default_labels())?;
            classifier::warm_up(&onnx)?;
            Ok::<_, classifier::ClassifierError>(onnx)
        })
        .await
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Model loading task failed: {}", e)))?
        .map_err(|e| {
            tracing::error!("Failed to load classifier: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;

        Self::build_with_classifier(config, Arc::new(classifier)).await
    }

    /// Build the application around an already constructed classifier.
    pub async fn build_with_classifier(
        config: FoodAiConfig,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, AppError> {
        let catalog = FoodCatalog::load(&config.catalog.path).map_err(|e| {
            tracing::error!("Failed to load food metadata: {}", e);
            e
        })?;

        let missing: Vec<&str> = classifier
            .labels()
            .iter()
            .map(String::as_str)
            .filter(|label| catalog.get(label).is_none())
            .collect();
        if !missing.is_empty() {
            tracing::warn!(?missing, "Classes without food metadata");
        }

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Food AI service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(config, catalog, classifier),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}
