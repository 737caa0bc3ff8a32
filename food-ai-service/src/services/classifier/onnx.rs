//! ONNX export of the food vision model, run with tract.

use super::{Classifier, ClassifierError};
use crate::services::preprocess::ImageTensor;
use std::path::Path;
use tract_onnx::prelude::*;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Expects NHWC `f32` input of shape `[1, size, size, 3]` with raw pixel
/// values; the model's own preprocessing is part of the graph.
pub struct OnnxClassifier {
    plan: Plan,
    labels: Vec<String>,
    input_size: u32,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("labels", &self.labels)
            .field("input_size", &self.input_size)
            .finish_non_exhaustive()
    }
}

impl OnnxClassifier {
    pub fn load(
        path: impl AsRef<Path>,
        input_size: u32,
        labels: Vec<String>,
    ) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let size = input_size as usize;

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| {
                model.with_input_fact(
                    0,
                    InferenceFact::dt_shape(f32::datum_type(), tvec!(1, size, size, 3)),
                )
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| ClassifierError::Load(format!("{}: {:#}", path.display(), e)))?;

        tracing::info!(
            path = %path.display(),
            input_size,
            classes = labels.len(),
            "Loaded ONNX classifier"
        );

        Ok(Self {
            plan,
            labels,
            input_size,
        })
    }

    fn run(&self, input: &ImageTensor) -> TractResult<Vec<f32>> {
        let size = input.size() as usize;
        let array =
            tract_ndarray::Array4::from_shape_vec((1, size, size, 3), input.data().to_vec())?;
        let outputs = self.plan.run(tvec!(array.into_tensor().into()))?;
        let scores = outputs[0].to_array_view::<f32>()?;
        Ok(scores.iter().copied().collect())
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>, ClassifierError> {
        if input.size() != self.input_size {
            return Err(ClassifierError::InputShape {
                expected: self.input_size,
                actual: input.size(),
            });
        }
        self.run(input)
            .map_err(|e| ClassifierError::Inference(format!("{:#}", e)))
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn input_size(&self) -> u32 {
        self.input_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::classifier::default_labels;

    #[test]
    fn test_missing_model_file_is_a_load_error() {
        let err = OnnxClassifier::load("/nonexistent/model.onnx", 224, default_labels()).unwrap_err();
        assert!(matches!(err, ClassifierError::Load(_)));
        assert!(err.to_string().contains("/nonexistent/model.onnx"));
    }
}
