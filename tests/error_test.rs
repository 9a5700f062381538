use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use mcp_catalog::providers::SyncPhase;
use mcp_catalog::utils::errors::CatalogError;
use serde_json::{json, Value};

async fn body_of(err: CatalogError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn test_error_codes() {
    assert_eq!(
        CatalogError::ServiceNotFound("x".to_string()).error_code(),
        "SERVICE_NOT_FOUND"
    );
    assert_eq!(
        CatalogError::ProviderSync {
            provider: "aitempl".to_string(),
            phase: SyncPhase::Fetching,
            message: "timeout".to_string(),
        }
        .error_code(),
        "PROVIDER_SYNC_ERROR"
    );
}

#[test]
fn test_sync_error_names_phase() {
    let err = CatalogError::ProviderSync {
        provider: "aitempl".to_string(),
        phase: SyncPhase::Normalizing,
        message: "no mcps".to_string(),
    };
    assert_eq!(err.to_string(), "provider aitempl failed while normalizing: no mcps");
}

#[tokio::test]
async fn test_not_found_bodies() {
    assert_eq!(
        body_of(CatalogError::ServiceNotFound("beta".to_string())).await,
        (StatusCode::NOT_FOUND, json!({ "error": "Service not found", "service": "beta" }))
    );
    assert_eq!(
        body_of(CatalogError::DescriptorNotFound("x".to_string())).await,
        (StatusCode::NOT_FOUND, json!({ "error": "MCP server not found", "id": "x" }))
    );
}

#[tokio::test]
async fn test_internal_body() {
    let (status, body) = body_of(CatalogError::NoNormalizer("acme".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
    assert!(body["message"].as_str().unwrap().contains("acme"));
    assert!(body["timestamp"].is_string());
}
