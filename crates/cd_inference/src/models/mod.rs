use std::sync::Arc;

use cd_core::{Error, Result, VisionModel};
use tracing::info;

use crate::Config;

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

/// Build the model named by `config.model`.
pub fn create_model(config: &Config) -> Result<Arc<dyn VisionModel>> {
    let model: Arc<dyn VisionModel> = match config.model.trim().to_ascii_lowercase().as_str() {
        "gemini" | "" => Arc::new(GeminiModel::new(config)?),
        "dummy" => Arc::new(DummyModel::new()),
        other => {
            return Err(Error::Config(format!(
                "Unknown model '{}'. Available models: gemini (default), dummy",
                other
            )))
        }
    };
    info!("🧠 Vision model ready: {}", model.name());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_known_models() {
        let config = Config {
            model: "dummy".to_string(),
            ..Config::default()
        };
        assert_eq!(create_model(&config).unwrap().name(), "Dummy");

        let config = Config {
            api_key: Some("test-key".to_string()),
            ..Config::default()
        };
        assert_eq!(create_model(&config).unwrap().name(), "Gemini");
    }

    #[test]
    fn test_gemini_requires_api_key() {
        let result = create_model(&Config::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_model() {
        let config = Config {
            model: "deepseek".to_string(),
            ..Config::default()
        };
        let err = create_model(&config).err().unwrap();
        assert!(err.to_string().contains("deepseek"));
    }
}
