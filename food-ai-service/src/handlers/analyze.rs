//! Image analysis: classify the dish, then score it for the selected conditions.

use axum::extract::{Json, State};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use std::time::Instant;
use validator::Validate;

use crate::handlers::advice::{assess, RiskAssessment};
use crate::models::Nutrients;
use crate::services::metrics::{self, AnalysisOutcome};
use crate::services::{decode_image, Prediction};
use crate::startup::AppState;

pub const UNKNOWN_FOOD: &str = "unknown_food";
pub const LOW_CONFIDENCE_MESSAGE: &str = "Food not recognized with high confidence";

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    /// Base64 image, optionally as a `data:` URL.
    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,

    #[validate(length(min = 1, message = "Please select at least one health condition"))]
    pub conditions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecognizedFood {
    pub food: String,
    pub confidence: f32,
    pub predictions: Vec<Prediction>,
    pub nutrients: Nutrients,
    pub substitute: Option<String>,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
}

#[derive(Debug, Serialize)]
pub struct UnrecognizedFood {
    pub food: &'static str,
    pub confidence: f32,
    pub predictions: Vec<Prediction>,
    pub nutrients: Nutrients,
    pub result: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Recognized(RecognizedFood),
    Unrecognized(UnrecognizedFood),
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

pub async fn analyze_food(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    req.validate()?;

    let AnalyzeRequest { image, conditions } = req;
    let classifier = state.classifier.clone();
    let size = classifier.input_size();

    let started = Instant::now();
    let classified = tokio::task::spawn_blocking(move || -> Result<Vec<Prediction>, AppError> {
        let tensor = decode_image(&image, size)?;
        Ok(classifier.classify(&tensor)?)
    })
    .await
    .map_err(|e| AppError::InternalError(anyhow::anyhow!("Classification task failed: {}", e)))?;

    let predictions = match classified {
        Ok(predictions) => predictions,
        Err(e) => {
            let outcome = match e {
                AppError::BadRequest(_) => AnalysisOutcome::InvalidImage,
                _ => AnalysisOutcome::Failed,
            };
            metrics::record_analysis(outcome);
            tracing::warn!(error = %e, "Food analysis failed");
            return Err(e);
        }
    };
    metrics::record_inference_duration(started.elapsed());

    let top = predictions.first().cloned().ok_or_else(|| {
        AppError::InternalError(anyhow::anyhow!("Classifier returned no predictions"))
    })?;
    let shown: Vec<Prediction> = predictions
        .into_iter()
        .take(state.config.model.top_k)
        .map(|p| Prediction {
            confidence: round3(p.confidence),
            ..p
        })
        .collect();

    tracing::info!(
        food = %top.label,
        confidence = top.confidence,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Image classified"
    );

    if top.confidence < state.config.model.confidence_threshold {
        metrics::record_analysis(AnalysisOutcome::LowConfidence);
        return Ok(Json(AnalyzeResponse::Unrecognized(UnrecognizedFood {
            food: UNKNOWN_FOOD,
            confidence: round3(top.confidence),
            predictions: shown,
            nutrients: Nutrients::default(),
            result: LOW_CONFIDENCE_MESSAGE,
        })));
    }

    let Some(record) = state.catalog.get(&top.label) else {
        metrics::record_analysis(AnalysisOutcome::UnknownFood);
        return Err(AppError::NotFound(anyhow::anyhow!(
            "{} not found in database",
            top.label
        )));
    };

    let assessment = assess(record, &conditions);
    metrics::record_analysis(AnalysisOutcome::Recognized);
    tracing::info!(
        food = %top.label,
        risk_score = assessment.risk_score,
        flags = ?assessment.flags,
        "Food analyzed"
    );

    Ok(Json(AnalyzeResponse::Recognized(RecognizedFood {
        confidence: round3(top.confidence),
        predictions: shown,
        nutrients: record.nutrients,
        substitute: record.substitute.clone(),
        food: top.label,
        assessment,
    })))
}
