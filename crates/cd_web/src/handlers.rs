use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use cd_core::{is_image_mime, AnalysisRequest, AnalysisResult, Error};
use serde_json::json;
use crate::{ApiError, AppState};

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({ "status": "ok", "model": state.analyzer.model_name() }))
}

/// `POST /analyze-image`: multipart upload with the image in the `file` field.
pub async fn analyze_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let mut multipart = multipart
        .map_err(|e| ApiError::bad_request(format!("Expected multipart/form-data: {}", e.body_text())))?;

    let request = read_file_field(&mut multipart, state.analyzer.max_upload_bytes()).await?;
    let result = state.analyzer.analyze(&request).await?;
    Ok(Json(result))
}

async fn read_file_field(multipart: &mut Multipart, limit: usize) -> Result<AnalysisRequest, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some("file") {
            continue;
        }
        // checked before the body is read so a large non-image part is not buffered
        let mime_type = match field.content_type() {
            Some(mime) if is_image_mime(mime) => mime.to_string(),
            Some(mime) => {
                return Err(ApiError::bad_request(format!(
                    "Unsupported content type '{}': expected an image",
                    mime
                )))
            }
            None => return Err(ApiError::bad_request("Missing content type on 'file' field")),
        };
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;

        let mut request = AnalysisRequest::new(bytes.to_vec(), mime_type);
        if let Some(name) = file_name {
            request = request.with_file_name(name);
        }
        return Ok(request);
    }
    Err(ApiError::bad_request("Missing 'file' field in multipart form"))
}

fn multipart_error(e: MultipartError, limit: usize) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError(Error::PayloadTooLarge { limit })
    } else {
        ApiError::bad_request(format!("Multipart error: {}", e.body_text()))
    }
}
