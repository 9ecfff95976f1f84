pub mod models;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use models::VisionModel;
pub use types::{is_image_mime, AnalysisRequest, AnalysisResult, FlightInfo};
