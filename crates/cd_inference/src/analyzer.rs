use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use cd_core::{AnalysisRequest, AnalysisResult, Error, Result, VisionModel};
use tracing::{debug, info, warn};

use crate::prompts::ANALYSIS_PROMPT;
use crate::shaping::shape;
use crate::Config;

/// Validates an upload, makes the single model call, and shapes the reply.
pub struct ImageAnalyzer {
    model: Arc<dyn VisionModel>,
    prompt: String,
    max_upload_bytes: usize,
}

impl fmt::Debug for ImageAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAnalyzer")
            .field("model", &self.model.name())
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl ImageAnalyzer {
    pub fn new(model: Arc<dyn VisionModel>, config: &Config) -> Self {
        Self {
            model,
            prompt: ANALYSIS_PROMPT.to_string(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub fn validate(&self, request: &AnalysisRequest) -> Result<()> {
        if request.is_empty() {
            return Err(Error::InvalidInput("Empty file".to_string()));
        }
        if !request.is_image() {
            return Err(Error::InvalidInput(format!(
                "Unsupported content type '{}': expected an image",
                request.mime_type
            )));
        }
        if request.len() > self.max_upload_bytes {
            return Err(Error::PayloadTooLarge {
                limit: self.max_upload_bytes,
            });
        }
        Ok(())
    }

    /// Validate the upload and return the model's unshaped reply.
    pub async fn generate_raw(&self, request: &AnalysisRequest) -> Result<String> {
        self.validate(request)?;
        info!(
            "🖼️ Analyzing {} ({}, {} bytes) with {}",
            request.file_name.as_deref().unwrap_or("upload"),
            request.mime_type,
            request.len(),
            self.model.name()
        );

        let start = Instant::now();
        match self.model.generate(request, &self.prompt).await {
            Ok(raw) => {
                debug!("Model replied with {} chars in {:?}", raw.len(), start.elapsed());
                Ok(raw)
            }
            Err(e) => {
                warn!("Model call failed after {:?}: {}", start.elapsed(), e);
                Err(e)
            }
        }
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let raw = self.generate_raw(request).await?;
        Ok(shape(&raw))
    }
}
