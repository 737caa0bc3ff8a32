//! HTTP tests for the analysis and advice endpoints.
//!
//! Run with: cargo test -p food-ai-service --test analyze_test

mod common;

use axum::http::StatusCode;
use common::{app, app_with, get, png_payload, post_json};
use food_ai_service::services::MockClassifier;
use serde_json::json;

#[tokio::test]
async fn analyze_recognized_food_returns_risk_assessment() {
    let (status, body) = post_json(
        app(),
        "/analyze",
        json!({ "image": png_payload(), "conditions": ["Diabetic", "Hypertensive"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["food"], "jollof_rice");
    assert_eq!(body["confidence"], 0.92);
    assert_eq!(body["risk_score"], 50);
    assert_eq!(body["risk_level"], "Medium");
    assert_eq!(body["risk_badge"], "🟡 Medium Risk");
    assert_eq!(body["flags"], json!(["High carb", "Salt content"]));
    assert_eq!(
        body["advice"],
        "Reduce starchy ingredients or use low-GI substitutes. Avoid adding salt; use natural spices."
    );
    assert_eq!(body["nutrients"]["carbs"], 65.0);
    assert_eq!(body["substitute"], "Brown rice jollof with extra vegetables");
}

#[tokio::test]
async fn analyze_returns_top_predictions_in_order() {
    let (status, body) = post_json(
        app(),
        "/analyze",
        json!({ "image": png_payload(), "conditions": ["Weight Loss"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let predictions = body["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 3);
    assert_eq!(predictions[0]["label"], "jollof_rice");
    assert!(predictions[0]["confidence"].as_f64() >= predictions[1]["confidence"].as_f64());
}

#[tokio::test]
async fn analyze_low_confidence_reports_unknown_food() {
    let app = app_with(MockClassifier::confident("suya", 0.4));
    let (status, body) = post_json(
        app,
        "/analyze",
        json!({ "image": png_payload(), "conditions": ["Diabetic"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["food"], "unknown_food");
    assert_eq!(body["confidence"], 0.4);
    assert_eq!(body["result"], "Food not recognized with high confidence");
    assert_eq!(body["nutrients"], json!({ "calories": 0.0, "carbs": 0.0, "protein": 0.0, "fat": 0.0 }));
    assert!(body.get("risk_score").is_none());
}

#[tokio::test]
async fn analyze_without_conditions_is_rejected() {
    let (status, body) = post_json(
        app(),
        "/analyze",
        json!({ "image": png_payload(), "conditions": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Validation error");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("Please select at least one health condition"));
}

#[tokio::test]
async fn analyze_rejects_undecodable_image() {
    let (status, body) = post_json(
        app(),
        "/analyze",
        json!({ "image": "data:image/png;base64,bm90IGFuIGltYWdl", "conditions": ["Diabetic"] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Image could not be decoded"));
}

#[tokio::test]
async fn analyze_with_unhealthy_classifier_is_unavailable() {
    let app = app_with(MockClassifier::confident("suya", 0.9).unhealthy());
    let (status, _) = post_json(
        app,
        "/analyze",
        json!({ "image": png_payload(), "conditions": ["Diabetic"] }),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn analyze_rejects_non_finite_model_scores() {
    let mut probabilities = vec![0.05; 10];
    probabilities[3] = f32::NAN;
    let app = app_with(MockClassifier::new(probabilities));
    let (status, body) = post_json(
        app,
        "/analyze",
        json!({ "image": png_payload(), "conditions": ["Diabetic"] }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert!(body.get("food").is_none());
}

#[tokio::test]
async fn analyze_resizes_to_classifier_input_size() {
    let app = app_with(MockClassifier::confident("suya", 0.9).with_input_size(32));
    let (status, body) = post_json(
        app,
        "/analyze",
        json!({ "image": png_payload(), "conditions": ["Malnourished"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["food"], "suya");
}

#[tokio::test]
async fn analyze_with_only_unknown_conditions_gives_fallback_advice() {
    let (status, body) = post_json(
        app(),
        "/analyze",
        json!({ "image": png_payload(), "conditions": ["Vegan"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_score"], 0);
    assert_eq!(body["risk_level"], "Low");
    assert_eq!(body["advice"], "No major risks detected. Enjoy in moderation.");
    assert_eq!(body["flags"], json!([]));
}

#[tokio::test]
async fn advice_for_catalog_food() {
    let (status, body) = post_json(
        app(),
        "/advice",
        json!({
            "food": "nkwobi",
            "conditions": ["Hypertensive", "Cholesterol Watch", "Weight Loss"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["food"], "nkwobi");
    assert_eq!(body["risk_score"], 80);
    assert_eq!(body["risk_level"], "High");
    assert_eq!(
        body["flags"],
        json!(["Salt content", "High fat", "Cholesterol risk", "High calorie"])
    );
    assert_eq!(
        body["advice"],
        "Avoid adding salt; use natural spices. Avoid palm oil and fried foods. \
         Consider smaller portions or reduce oil usage."
    );
}

#[tokio::test]
async fn advice_repeated_condition_counts_twice() {
    let (status, body) = post_json(
        app(),
        "/advice",
        json!({ "food": "tuwo", "conditions": ["Malnourished", "Malnourished"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_score"], 30);
    assert_eq!(body["flags"], json!(["Low protein", "Low protein"]));
    assert_eq!(body["advice"], "Add protein-rich sides like beans or eggs.");
}

#[tokio::test]
async fn advice_for_unknown_food_is_not_found() {
    let (status, body) = post_json(
        app(),
        "/advice",
        json!({ "food": "pizza", "conditions": ["Diabetic"] }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "pizza not found in database");
}

#[tokio::test]
async fn foods_lists_the_catalog() {
    let (status, body) = get(app(), "/foods").await;

    assert_eq!(status, StatusCode::OK);
    let foods = body["foods"].as_array().unwrap();
    assert_eq!(foods.len(), 10);
    assert_eq!(foods[0]["name"], "akara");
    assert!(foods.iter().any(|f| f["name"] == "yam_porridge"));
}
