//! Mock classifier for testing.

use super::{default_labels, Classifier, ClassifierError, CLASS_NAMES};
use crate::services::preprocess::ImageTensor;

/// Returns the same distribution for every input.
pub struct MockClassifier {
    labels: Vec<String>,
    probabilities: Vec<f32>,
    input_size: u32,
    healthy: bool,
}

impl MockClassifier {
    pub fn new(probabilities: Vec<f32>) -> Self {
        Self {
            labels: default_labels(),
            probabilities,
            input_size: 8,
            healthy: true,
        }
    }

    /// `confidence` on `label`, the remainder spread over the other classes.
    pub fn confident(label: &str, confidence: f32) -> Self {
        let others = (CLASS_NAMES.len() - 1) as f32;
        let rest = (1.0 - confidence).max(0.0) / others;
        let probabilities = CLASS_NAMES
            .iter()
            .map(|name| if *name == label { confidence } else { rest })
            .collect();
        Self::new(probabilities)
    }

    pub fn with_input_size(mut self, input_size: u32) -> Self {
        self.input_size = input_size;
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }
}

impl Classifier for MockClassifier {
    fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>, ClassifierError> {
        if !self.healthy {
            return Err(ClassifierError::Unavailable(
                "Mock classifier not enabled".to_string(),
            ));
        }
        if input.size() != self.input_size {
            return Err(ClassifierError::InputShape {
                expected: self.input_size,
                actual: input.size(),
            });
        }
        Ok(self.probabilities.clone())
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn input_size(&self) -> u32 {
        self.input_size
    }

    fn health_check(&self) -> Result<(), ClassifierError> {
        if self.healthy {
            Ok(())
        } else {
            Err(ClassifierError::Unavailable(
                "Mock classifier not enabled".to_string(),
            ))
        }
    }
}
