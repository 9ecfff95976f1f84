use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    /// The provider could not be reached or did not answer in time.
    #[error("Model provider unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The provider answered, but with a non-success status or an unusable body.
    #[error("Model provider returned a bad response: {0}")]
    UpstreamResponse(String),

    /// Never surfaced to callers; the shaper falls back to the raw text.
    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
