//! Catalog routes

use crate::catalog::{CanonicalDescriptor, Source};
use crate::config::StoreInfo;
use crate::http_server::server::AppState;
use crate::providers::ProviderConfig;
use crate::utils::errors::{CatalogError, CatalogResult};
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Version of the store response envelope
pub const STORE_VERSION: &str = "1.0.0";

const CATALOG_CACHE: &str = "public, max-age=3600";

/// Store response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreResponse {
    pub version: String,
    pub provider: StoreInfo,
    pub servers: Vec<CanonicalDescriptor>,
}

impl StoreResponse {
    fn new<'a>(provider: StoreInfo, servers: impl IntoIterator<Item = &'a CanonicalDescriptor>) -> Self {
        Self {
            version: STORE_VERSION.to_string(),
            provider,
            servers: servers
                .into_iter()
                .map(CanonicalDescriptor::with_normalized_name)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub source: Option<String>,
}

fn cached<T: IntoResponse>(body: T) -> Response {
    ([(header::CACHE_CONTROL, CATALOG_CACHE)], body).into_response()
}

fn parse_source(raw: Option<&str>) -> CatalogResult<Option<Source>> {
    raw.map(|s| {
        s.parse::<Source>().map_err(|invalid| {
            CatalogError::InvalidRequest(format!(
                "Invalid source: {}. Valid sources: official, community",
                invalid
            ))
        })
    })
    .transpose()
}

/// Health check endpoint
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/mcps.json
pub async fn catalog(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CatalogQuery>,
) -> CatalogResult<Response> {
    let source = parse_source(query.source.as_deref())?;
    let store = state.settings.store.clone();

    let response = match &state.providers {
        Some(providers) if state.settings.aggregate_providers => {
            let servers = providers.sync_all().await;
            StoreResponse::new(
                store,
                servers
                    .iter()
                    .filter(|d| source.map_or(true, |s| d.source == s)),
            )
        }
        _ => match source {
            Some(source) => StoreResponse::new(store, state.catalog.by_source(source)),
            None => StoreResponse::new(store, state.catalog.aggregate_all()),
        },
    };

    debug!("Serving {} descriptors", response.servers.len());
    Ok(cached(Json(response)))
}

/// GET /api/mcps/services
pub async fn services(State(state): State<Arc<AppState>>) -> Response {
    cached(Json(json!({ "services": state.catalog.services() })))
}

/// GET /api/mcps/stats
pub async fn stats(State(state): State<Arc<AppState>>) -> Response {
    let counts = state.catalog.count_by_source();
    let services = state.catalog.service_names();

    cached(Json(json!({
        "total": counts.total(),
        "official": counts.official,
        "community": counts.community,
        "services": services.len(),
        "serviceList": services,
    })))
}

/// GET /api/mcps/service/{service}
pub async fn service(
    State(state): State<Arc<AppState>>,
    Path(service): Path<String>,
) -> CatalogResult<Response> {
    let servers = state.catalog.by_service(&service);
    if servers.is_empty() {
        return Err(CatalogError::ServiceNotFound(service));
    }

    let meta = state.catalog.service_meta(&service);
    let provider = StoreInfo {
        id: service.clone(),
        name: meta
            .map(|m| m.display_name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| service.clone()),
        homepage: meta.and_then(|m| m.website.clone()).filter(|w| !w.is_empty()),
    };

    Ok(cached(Json(StoreResponse::new(provider, servers))))
}

/// GET /api/mcps/{id}
pub async fn descriptor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> CatalogResult<Response> {
    if let Some(found) = state.catalog.by_id(&id) {
        return Ok(cached(Json(found.with_normalized_name())));
    }

    if let Some(providers) = state
        .providers
        .as_ref()
        .filter(|_| state.settings.aggregate_providers)
    {
        if let Some(found) = providers.find_server(&id).await {
            return Ok(cached(Json(found.with_normalized_name())));
        }
    }

    Err(CatalogError::DescriptorNotFound(id))
}

/// GET /api/mcps/providers
pub async fn providers(State(state): State<Arc<AppState>>) -> Response {
    let providers: Vec<&ProviderConfig> = state
        .providers
        .as_ref()
        .map(|p| p.providers())
        .unwrap_or_default();
    cached(Json(json!({ "providers": providers })))
}

/// GET /api/mcps/provider/{provider_id}
pub async fn provider(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<String>,
) -> CatalogResult<Response> {
    let sync = state
        .providers
        .as_ref()
        .ok_or_else(|| CatalogError::ProviderNotFound(provider_id.clone()))?;
    let config = sync
        .provider(&provider_id)
        .ok_or_else(|| CatalogError::ProviderNotFound(provider_id.clone()))?;

    let info = StoreInfo {
        id: config.id.clone(),
        name: config.name.clone(),
        homepage: config.homepage.clone(),
    };
    let servers = sync.sync_provider(&provider_id).await?;

    Ok(cached(Json(StoreResponse::new(info, &servers))))
}

/// GET /api/mcps
pub async fn catalog_redirect() -> Redirect {
    Redirect::to("/api/mcps.json")
}
