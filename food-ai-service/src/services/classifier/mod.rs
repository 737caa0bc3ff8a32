//! Image classifier abstraction and implementations.
//!
//! The model is an opaque function from an [`ImageTensor`] to a probability
//! distribution over a fixed, ordered list of class labels. Implementations are
//! synchronous and CPU-bound; callers run them on the blocking pool.

pub mod mock;
pub mod onnx;

pub use mock::MockClassifier;
pub use onnx::OnnxClassifier;

use crate::services::preprocess::ImageTensor;
use serde::Serialize;
use service_core::error::AppError;
use thiserror::Error;

/// Model output classes, in output order.
pub const CLASS_NAMES: [&str; 10] = [
    "akara",
    "banga_soup",
    "egusi_soup",
    "jollof_rice",
    "moi_moi",
    "nkwobi",
    "okpa",
    "suya",
    "tuwo",
    "yam_porridge",
];

pub fn default_labels() -> Vec<String> {
    CLASS_NAMES.iter().map(|s| s.to_string()).collect()
}

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Model could not be loaded: {0}")]
    Load(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Expected a {expected}x{expected} input, got {actual}x{actual}")]
    InputShape { expected: u32, actual: u32 },

    #[error("Model produced {actual} scores for {expected} labels")]
    OutputShape { expected: usize, actual: usize },

    #[error("Classifier unavailable: {0}")]
    Unavailable(String),
}

impl From<ClassifierError> for AppError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::Unavailable(_) => AppError::ServiceUnavailable,
            other => AppError::InternalError(anyhow::Error::new(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

pub trait Classifier: Send + Sync {
    /// Raw class probabilities, one per label.
    fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>, ClassifierError>;

    fn labels(&self) -> &[String];

    /// Side length of the square input the model expects.
    fn input_size(&self) -> u32;

    fn health_check(&self) -> Result<(), ClassifierError> {
        Ok(())
    }

    /// Predictions sorted by descending confidence.
    fn classify(&self, input: &ImageTensor) -> Result<Vec<Prediction>, ClassifierError> {
        let probabilities = self.predict(input)?;
        rank(&probabilities, self.labels())
    }
}

/// Pair scores with labels and sort them, most confident first.
pub fn rank(probabilities: &[f32], labels: &[String]) -> Result<Vec<Prediction>, ClassifierError> {
    if probabilities.len() != labels.len() {
        return Err(ClassifierError::OutputShape {
            expected: labels.len(),
            actual: probabilities.len(),
        });
    }
    if let Some((label, score)) = labels
        .iter()
        .zip(probabilities)
        .find(|(_, score)| !score.is_finite())
    {
        return Err(ClassifierError::Inference(format!(
            "non-finite score {} for {}",
            score, label
        )));
    }

    let mut predictions: Vec<Prediction> = labels
        .iter()
        .zip(probabilities)
        .map(|(label, &confidence)| Prediction {
            label: label.clone(),
            confidence,
        })
        .collect();
    predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    Ok(predictions)
}

/// Run one prediction on a blank image so the first request
/// doesn't pay for lazy initialization.
pub fn warm_up(classifier: &dyn Classifier) -> Result<(), ClassifierError> {
    let started = std::time::Instant::now();
    classifier.predict(&ImageTensor::zeros(classifier.input_size()))?;
    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Classifier warmed up"
    );
    Ok(())
}
