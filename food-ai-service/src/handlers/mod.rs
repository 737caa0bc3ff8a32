//! HTTP handlers for the food AI service.

pub mod advice;
pub mod analyze;
pub mod app;

pub use advice::{advise, list_foods};
pub use analyze::analyze_food;
pub use app::{health_check, metrics, readiness_check, root};
