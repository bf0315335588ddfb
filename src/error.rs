use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use vision_sim::FilterError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Image error: {0}")]
    Codec(#[from] CodecError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Image too large: {width}x{height} pixels (max {max} pixels)")]
    ImageTooLarge { width: u32, height: u32, max: u64 },

    #[error("Empty upload")]
    EmptyUpload,
}

impl From<image::ImageError> for CodecError {
    fn from(e: image::ImageError) -> Self {
        CodecError::Decode(e.to_string())
    }
}

impl From<png::EncodingError> for CodecError {
    fn from(e: png::EncodingError) -> Self {
        CodecError::PngEncode(e.to_string())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Filter(FilterError::UnknownFilterKind(_)) => StatusCode::BAD_REQUEST,
            ApiError::Filter(FilterError::InvalidBuffer { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Codec(CodecError::Decode(_)) => StatusCode::BAD_REQUEST,
            ApiError::Codec(CodecError::EmptyUpload) => StatusCode::BAD_REQUEST,
            ApiError::Codec(CodecError::ImageTooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Codec(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_unknown_filter() {
        let error: ApiError = FilterError::UnknownFilterKind("sepia".to_string()).into();
        assert_eq!(
            error.to_string(),
            "Filter error: unknown filter kind: \"sepia\""
        );
    }

    #[test]
    fn test_api_error_internal() {
        let error = ApiError::Internal("task panicked".to_string());
        assert_eq!(error.to_string(), "Internal error: task panicked");
    }

    #[test]
    fn test_codec_error_too_large() {
        let error = CodecError::ImageTooLarge {
            width: 10000,
            height: 10000,
            max: 40_000_000,
        };
        assert_eq!(
            error.to_string(),
            "Image too large: 10000x10000 pixels (max 40000000 pixels)"
        );
    }

    #[test]
    fn test_codec_error_decode() {
        let error = CodecError::Decode("bad signature".to_string());
        assert_eq!(error.to_string(), "Image decode error: bad signature");
    }

    #[test]
    fn test_api_error_from_codec_error() {
        let api_error: ApiError = CodecError::EmptyUpload.into();
        match api_error {
            ApiError::Codec(CodecError::EmptyUpload) => {}
            _ => panic!("Expected Codec variant"),
        }
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response =
            ApiError::Filter(FilterError::UnknownFilterKind("x".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Filter(FilterError::InvalidBuffer {
            width: 1,
            height: 1,
            len: 0,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = ApiError::Codec(CodecError::Decode("x".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Codec(CodecError::ImageTooLarge {
            width: 1,
            height: 1,
            max: 0,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = ApiError::Codec(CodecError::PngEncode("x".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::Internal("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
