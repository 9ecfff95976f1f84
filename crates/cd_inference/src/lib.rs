use std::fmt;
use std::time::Duration;

pub mod analyzer;
pub mod models;
pub mod prompts;
pub mod shaping;

pub const DEFAULT_MODEL_NAME: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Process-wide settings, built once at startup and handed to the analyzer and model.
#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    /// Which backend to use: "gemini" or "dummy".
    pub model: String,
    /// Provider-side model identifier.
    pub model_name: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_upload_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini".to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

pub use analyzer::ImageAnalyzer;
pub use models::create_model;
