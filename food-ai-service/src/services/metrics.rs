//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and records analysis-specific metrics.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!(error = %e, "Failed to install Prometheus recorder"),
    }
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

/// Outcome label of one analysis request.
#[derive(Debug, Clone, Copy)]
pub enum AnalysisOutcome {
    Recognized,
    LowConfidence,
    UnknownFood,
    InvalidImage,
    Failed,
}

impl AnalysisOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            AnalysisOutcome::Recognized => "recognized",
            AnalysisOutcome::LowConfidence => "low_confidence",
            AnalysisOutcome::UnknownFood => "unknown_food",
            AnalysisOutcome::InvalidImage => "invalid_image",
            AnalysisOutcome::Failed => "failed",
        }
    }
}

pub fn record_analysis(outcome: AnalysisOutcome) {
    counter!("food_analysis_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_inference_duration(elapsed: Duration) {
    histogram!("food_inference_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_risk_level(level: &'static str) {
    counter!("food_risk_level_total", "level" => level).increment(1);
}
