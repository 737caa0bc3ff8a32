use service_core::config::{self as core_config, get_env, get_env_optional, get_env_parsed};
use service_core::error::AppError;

const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;
const DEFAULT_INPUT_SIZE: u32 = 224;
const DEFAULT_TOP_K: usize = 3;
/// Base64 photos from phone cameras run to several megabytes.
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct FoodAiConfig {
    pub common: core_config::Config,
    pub model: ModelConfig,
    pub catalog: CatalogConfig,
    pub http: HttpConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Path of the ONNX export of the classifier.
    pub path: String,
    /// Side length of the square model input.
    pub input_size: u32,
    /// Below this top-1 confidence the food is reported as unrecognized.
    pub confidence_threshold: f32,
    /// Number of predictions echoed in responses.
    pub top_k: usize,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl FoodAiConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = core_config::is_production();

        let config = FoodAiConfig {
            common: common_config,
            model: ModelConfig {
                path: get_env("MODEL_PATH", Some("food_vision_model.onnx"), is_prod)?,
                input_size: get_env_parsed("MODEL_INPUT_SIZE", DEFAULT_INPUT_SIZE, is_prod)?,
                confidence_threshold: get_env_parsed(
                    "CONFIDENCE_THRESHOLD",
                    DEFAULT_CONFIDENCE_THRESHOLD,
                    is_prod,
                )?,
                top_k: get_env_parsed("PREDICTION_TOP_K", DEFAULT_TOP_K, is_prod)?,
            },
            catalog: CatalogConfig {
                path: get_env("FOOD_INFO_PATH", Some("food_info.json"), is_prod)?,
            },
            http: HttpConfig {
                max_body_bytes: get_env_parsed("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES, is_prod)?,
            },
            observability: ObservabilityConfig {
                log_level: get_env("LOG_LEVEL", Some("info"), false)?,
                otlp_endpoint: get_env_optional("OTLP_ENDPOINT"),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=1.0).contains(&self.model.confidence_threshold) {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "CONFIDENCE_THRESHOLD must be within 0..=1, got {}",
                self.model.confidence_threshold
            )));
        }
        if self.model.input_size == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "MODEL_INPUT_SIZE must be positive"
            )));
        }
        Ok(())
    }
}
