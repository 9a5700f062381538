//! Fallback and panic responses

use crate::utils::errors::internal_error_body;
use axum::{
    extract::OriginalUri,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::any::Any;

/// 404 for any route the router does not know
pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": format!("Route {} {} not found", method, uri.path()),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// Turns a handler panic into a 500 JSON body
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    tracing::error!("Handler panicked: {}", message);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(internal_error_body(message))).into_response()
}
