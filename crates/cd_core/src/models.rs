use async_trait::async_trait;
use crate::types::AnalysisRequest;
use crate::Result;

#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Send the image and the instruction prompt to the model, returning its raw text reply.
    /// Implementations make exactly one outbound call and never retry.
    async fn generate(&self, request: &AnalysisRequest, prompt: &str) -> Result<String>;
}
