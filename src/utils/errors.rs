use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("service not found: {0}")]
    ServiceNotFound(String),

    #[error("descriptor not found: {0}")]
    DescriptorNotFound(String),

    #[error("provider not found or disabled: {0}")]
    ProviderNotFound(String),

    #[error("provider {provider} failed while {phase}: {message}")]
    ProviderSync {
        provider: String,
        phase: crate::providers::SyncPhase,
        message: String,
    },

    #[error("no normalizer registered for provider: {0}")]
    NoNormalizer(String),

    #[error("invalid provider payload: {0}")]
    InvalidPayload(String),

    #[error("invalid descriptor {}: {message}", path.display())]
    InvalidDescriptor { path: PathBuf, message: String },

    #[error("duplicate descriptor id '{id}' in {} (first seen in service '{first_service}')", path.display())]
    DuplicateDescriptorId {
        id: String,
        path: PathBuf,
        first_service: String,
    },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("announcements error: {0}")]
    Announcements(String),

    #[error("internal error: {0}")]
    InternalError(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<anyhow::Error> for CatalogError {
    fn from(e: anyhow::Error) -> Self {
        CatalogError::InternalError(e.to_string())
    }
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceNotFound(_) | Self::DescriptorNotFound(_) | Self::ProviderNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ServiceNotFound(_) => "SERVICE_NOT_FOUND",
            Self::DescriptorNotFound(_) => "DESCRIPTOR_NOT_FOUND",
            Self::ProviderNotFound(_) => "PROVIDER_NOT_FOUND",
            Self::ProviderSync { .. } => "PROVIDER_SYNC_ERROR",
            Self::NoNormalizer(_) => "NO_NORMALIZER",
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::InvalidDescriptor { .. } => "INVALID_DESCRIPTOR",
            Self::DuplicateDescriptorId { .. } => "DUPLICATE_DESCRIPTOR_ID",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Announcements(_) => "ANNOUNCEMENTS_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Http(_) => "HTTP_CLIENT_ERROR",
        }
    }
}

/// Body for unexpected failures: `{error, message, timestamp}`.
pub fn internal_error_body(message: impl Into<String>) -> serde_json::Value {
    json!({
        "error": "Internal Server Error",
        "message": message.into(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::ServiceNotFound(service) => json!({
                "error": "Service not found",
                "service": service,
            }),
            Self::DescriptorNotFound(id) => json!({
                "error": "MCP server not found",
                "id": id,
            }),
            Self::ProviderNotFound(provider) => json!({
                "error": "Provider not found",
                "provider": provider,
            }),
            Self::InvalidRequest(message) => json!({
                "error": message,
            }),
            _ => {
                tracing::error!(code = self.error_code(), "request failed: {}", self);
                internal_error_body(self.to_string())
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_variants_map_to_404() {
        assert_eq!(
            CatalogError::ServiceNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::DescriptorNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::ProviderNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_other_variants_map_to_500() {
        let err = CatalogError::NoNormalizer("acme".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "NO_NORMALIZER");
        assert_eq!(
            CatalogError::InvalidRequest("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_error_body_shape() {
        let body = internal_error_body("boom");
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], "boom");
        assert!(body["timestamp"].as_str().is_some());
    }
}
