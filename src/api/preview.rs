use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use vision_sim::{FilterKind, FilterSpec};

use crate::error::{ApiError, CodecError};
use crate::models::AppConfig;
use crate::rendering::to_data_url;
use crate::services::PreviewService;

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Error message
    pub error: String,
}

/// Output encoding of a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PreviewFormat {
    /// Raw `image/png` body
    #[default]
    Png,
    /// JSON with a `data:image/png;base64,...` URL
    DataUrl,
}

/// Query parameters for the preview endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PreviewQuery {
    /// Filter tag (defaults to the configured filter)
    #[serde(default)]
    pub filter: Option<String>,
    /// Strength on the 0-100 slider scale; out-of-range values are clamped
    #[serde(default)]
    pub intensity: Option<f32>,
    /// Response encoding
    #[serde(default)]
    pub format: PreviewFormat,
}

/// Preview returned as a data URL
#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewJsonResponse {
    /// `data:image/png;base64,...`
    pub data_url: String,
    /// Applied filter tag
    pub filter: String,
    /// Applied intensity in [0, 1]
    pub intensity: f32,
    /// SHA-256 of the uploaded image
    pub source_hash: String,
    /// When the preview was generated (RFC 3339)
    pub generated_at: String,
}

/// Resolve the requested selection against configured defaults
fn resolve_spec(config: &AppConfig, query: &PreviewQuery) -> Result<FilterSpec, ApiError> {
    let kind = match query.filter.as_deref() {
        Some(tag) => tag.parse::<FilterKind>()?,
        None => config.default_kind(),
    };
    let percent = query.intensity.unwrap_or(config.defaults.intensity);
    Ok(FilterSpec::from_percent(kind, percent))
}

/// Render a filtered PNG preview of an uploaded image
///
/// The body is the original image. Each call filters that original, so
/// previews never compound.
#[utoipa::path(
    post,
    path = "/api/preview",
    request_body(content = Vec<u8>, description = "Original image (PNG, JPEG or WebP)", content_type = "image/*"),
    params(PreviewQuery),
    responses(
        (status = 200, description = "Filtered PNG, or PreviewJsonResponse when format=data-url", content_type = "image/png"),
        (status = 400, description = "Unknown filter or undecodable image", body = ErrorResponse),
        (status = 413, description = "Image too large", body = ErrorResponse),
    ),
    tag = "Preview"
)]
pub async fn handle_preview(
    State(service): State<Arc<PreviewService>>,
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<PreviewQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    if body.is_empty() {
        return Err(CodecError::EmptyUpload.into());
    }
    let spec = resolve_spec(&config, &query)?;

    let preview = service.render(Arc::from(body.as_ref()), spec).await?;

    tracing::info!(
        filter = %spec.kind(),
        intensity = spec.intensity(),
        size_bytes = preview.png_bytes.len(),
        format = ?query.format,
        "Preview ready"
    );

    match query.format {
        PreviewFormat::Png => Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "image/png".to_string()),
                (header::CONTENT_LENGTH, preview.png_bytes.len().to_string()),
            ],
            Bytes::from(preview.png_bytes.to_vec()),
        )
            .into_response()),
        PreviewFormat::DataUrl => Ok(Json(PreviewJsonResponse {
            data_url: to_data_url(&preview.png_bytes),
            filter: spec.kind().as_str().to_string(),
            intensity: spec.intensity(),
            source_hash: crate::services::source_hash(&body),
            generated_at: preview.generated_at.to_rfc3339(),
        })
        .into_response()),
    }
}
