use crate::announcements::AnnouncementStore;
use crate::catalog::CatalogAggregator;
use crate::config::CatalogConfig;
use crate::http_server::middleware::{catalog_cors, handle_panic, not_found};
use crate::http_server::{announcements, openapi, routes};
use crate::providers::ProviderSyncService;
use crate::utils::shutdown::shutdown_signal;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared handler state, built once at startup
pub struct AppState {
    pub catalog: Arc<CatalogAggregator>,
    pub providers: Option<Arc<ProviderSyncService>>,
    pub announcements: Option<Arc<dyn AnnouncementStore>>,
    pub settings: CatalogConfig,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogAggregator>, settings: CatalogConfig) -> Self {
        Self {
            catalog,
            providers: None,
            announcements: None,
            settings,
        }
    }

    pub fn with_providers(mut self, providers: Arc<ProviderSyncService>) -> Self {
        self.providers = Some(providers);
        self
    }

    pub fn with_announcements(mut self, store: Arc<dyn AnnouncementStore>) -> Self {
        self.announcements = Some(store);
        self
    }
}

pub fn create_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/mcps.json", get(routes::catalog))
        .route("/mcps", get(routes::catalog_redirect))
        .route("/mcps/services", get(routes::services))
        .route("/mcps/stats", get(routes::stats))
        .route("/mcps/providers", get(routes::providers))
        .route("/mcps/service/{service}", get(routes::service))
        .route("/mcps/provider/{provider_id}", get(routes::provider))
        .route("/mcps/{id}", get(routes::descriptor))
        .route("/announcements", get(announcements::announcements));

    Router::new()
        .route("/", get(openapi::swagger_ui))
        .route("/openapi.json", get(openapi::openapi_json))
        .route("/health", get(routes::health))
        .nest("/api", api)
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(catalog_cors(allowed_origins))
}

pub struct HttpServer {
    addr: SocketAddr,
    router: Router,
}

impl HttpServer {
    pub fn new(host: &str, port: u16, router: Router) -> anyhow::Result<Self> {
        let addr = SocketAddr::from((host.parse::<std::net::IpAddr>()?, port));
        Ok(Self { addr, router })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        info!("Starting HTTP server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}
