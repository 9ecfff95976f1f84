use std::sync::Arc;
use cd_inference::ImageAnalyzer;

pub struct AppState {
    pub analyzer: Arc<ImageAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: ImageAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}
