//! Domain models for the food AI service.

pub mod advice;
pub mod condition;
pub mod food;

pub use advice::{AdviceResult, RiskLevel};
pub use condition::Condition;
pub use food::{FoodProfile, FoodRecord, Nutrients};
