//! Catalog listing and model-free risk advice.

use axum::extract::{Json, State};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use validator::Validate;

use crate::models::{FoodProfile, FoodRecord, Nutrients};
use crate::services::{evaluate, metrics};
use crate::startup::AppState;

// ============================================================================
// Request/Response DTOs
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct AdviceRequest {
    #[validate(length(min = 1, message = "Food name is required"))]
    pub food: String,

    #[validate(length(min = 1, message = "Please select at least one health condition"))]
    pub conditions: Vec<String>,
}

/// Risk fields shared by `/advice` and `/analyze` responses.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub advice: String,
    pub flags: Vec<String>,
    pub risk_score: u32,
    pub risk_level: &'static str,
    pub risk_badge: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub food: String,
    pub nutrients: Nutrients,
    pub substitute: Option<String>,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
}

#[derive(Debug, Serialize)]
pub struct FoodEntry {
    pub name: String,
    pub nutrients: Nutrients,
    pub ingredients: Vec<String>,
    pub substitute: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FoodListResponse {
    pub foods: Vec<FoodEntry>,
}

/// Run the risk advisor on a catalog record.
pub fn assess<S: AsRef<str>>(record: &FoodRecord, conditions: &[S]) -> RiskAssessment {
    let result = evaluate(&FoodProfile::from(record), conditions);
    let level = result.risk_level();
    metrics::record_risk_level(level.label());

    RiskAssessment {
        advice: result.advice,
        flags: result.flags,
        risk_score: result.risk_score,
        risk_level: level.label(),
        risk_badge: level.badge(),
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn list_foods(State(state): State<AppState>) -> Json<FoodListResponse> {
    let foods = state
        .catalog
        .iter()
        .map(|(name, record)| FoodEntry {
            name: name.to_string(),
            nutrients: record.nutrients,
            ingredients: record.ingredients.clone(),
            substitute: record.substitute.clone(),
        })
        .collect();

    Json(FoodListResponse { foods })
}

pub async fn advise(
    State(state): State<AppState>,
    Json(req): Json<AdviceRequest>,
) -> Result<Json<AdviceResponse>, AppError> {
    req.validate()?;

    let record = state.catalog.get(&req.food).ok_or_else(|| {
        AppError::NotFound(anyhow::anyhow!("{} not found in database", req.food))
    })?;

    let assessment = assess(record, &req.conditions);
    tracing::info!(
        food = %req.food,
        risk_score = assessment.risk_score,
        flags = ?assessment.flags,
        "Advice generated"
    );

    Ok(Json(AdviceResponse {
        nutrients: record.nutrients,
        substitute: record.substitute.clone(),
        food: req.food,
        assessment,
    }))
}
