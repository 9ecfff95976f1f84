use std::fmt;
use cd_core::{AnalysisRequest, Result};
use super::VisionModel;

/// Canned reply used for offline runs; never touches the network.
pub const DUMMY_REPLY: &str = r#"{
  "people_count": 12,
  "crowd_score": 4,
  "crowd_label": "Medium",
  "confidence": 50,
  "rationale": "Canned reply from the dummy model.",
  "screen_detected": false,
  "departure_type": "none",
  "departure_info": [],
  "general_description": "Placeholder scene description produced without calling a vision model."
}"#;

pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl VisionModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, request: &AnalysisRequest, _prompt: &str) -> Result<String> {
        tracing::debug!("Dummy model ignoring {} bytes of {}", request.len(), request.mime_type);
        Ok(DUMMY_REPLY.to_string())
    }
}
