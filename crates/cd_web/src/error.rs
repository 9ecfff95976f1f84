use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cd_core::Error;
use serde_json::json;

/// Handler error; renders as `{"error": "..."}` with a status derived from the core error.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(Error::InvalidInput(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Error::UpstreamUnavailable(_) | Error::Http(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::UpstreamResponse(_) | Error::MalformedModelOutput(_) => StatusCode::BAD_GATEWAY,
            Error::Config(_) | Error::Io(_) | Error::Serialization(_) | Error::External(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("❌ {} -> {}", self.0, status);
        } else {
            tracing::info!("🚫 Rejected request: {}", self.0);
        }
        let message = match &self.0 {
            Error::UpstreamUnavailable(_) | Error::Http(_) => "Vision model request failed".to_string(),
            Error::UpstreamResponse(_) | Error::MalformedModelOutput(_) => {
                "Vision model returned an unusable response".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError(Error::PayloadTooLarge { limit: 1 }).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError(Error::UpstreamUnavailable("timeout".into())).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError(Error::UpstreamResponse("HTTP 500".into())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError(Error::Config("missing".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
