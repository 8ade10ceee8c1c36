//! # HTTP API Errors
//!
//! The fixed set of failures a client can see. Backend causes are logged
//! where they occur and never reach the response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// User-facing error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Missing layer name")]
    MissingLayerName,

    #[error("Invalid layer name")]
    InvalidLayerName,

    #[error("Error al obtener lista de capas")]
    LayerListUnavailable,

    #[error("Error al obtener capa")]
    LayerUnavailable,

    #[error("Error al cargar la página")]
    PageUnavailable,
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingLayerName => StatusCode::BAD_REQUEST,
            ApiError::InvalidLayerName => StatusCode::BAD_REQUEST,
            ApiError::LayerListUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::LayerUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PageUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::from(self))).into_response()
    }
}
