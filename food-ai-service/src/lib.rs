//! Food recognition service: classifies a photo of a dish and scores it
//! against a user's health conditions.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::AppState;
