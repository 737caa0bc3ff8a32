pub mod advisor;
pub mod catalog;
pub mod classifier;
pub mod metrics;
pub mod preprocess;

pub use advisor::evaluate;
pub use catalog::FoodCatalog;
pub use classifier::{Classifier, ClassifierError, MockClassifier, OnnxClassifier, Prediction};
pub use preprocess::{decode_image, ImageTensor, PreprocessError};
