//! `serve` command

use crate::announcements::{AnnouncementStore, SupabaseStore};
use crate::catalog::CatalogAggregator;
use crate::cli::args::ServeArgs;
use crate::cli::load_config;
use crate::config::Config;
use crate::http_server::{create_router, AppState, HttpServer};
use crate::providers::{HttpFetcher, ProviderSyncService};
use crate::utils::errors::CatalogResult;
use crate::utils::logging::init_logging;
use std::sync::Arc;
use tracing::{info, warn};

/// Wire registry, providers and announcements into the handler state.
pub fn build_state(config: &Config) -> CatalogResult<AppState> {
    let catalog = Arc::new(CatalogAggregator::load(&config.catalog.data_dir)?);
    let counts = catalog.count_by_source();
    info!(
        "Loaded {} descriptors from {} services ({} official, {} community)",
        counts.total(),
        catalog.registry().len(),
        counts.official,
        counts.community
    );

    let fetcher = Arc::new(HttpFetcher::new(&config.http_client)?);
    let providers = Arc::new(ProviderSyncService::new(
        config.providers.clone(),
        catalog.clone(),
        fetcher,
    ));
    info!("{} providers enabled", providers.providers().len());

    let mut state = AppState::new(catalog, config.catalog.clone()).with_providers(providers);

    match SupabaseStore::new(&config.announcements, &config.http_client) {
        Ok(store) => {
            let store: Arc<dyn AnnouncementStore> = Arc::new(store);
            state = state.with_announcements(store);
        }
        Err(e) => warn!("Announcements disabled: {}", e),
    }

    Ok(state)
}

pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    init_logging(&args.log_level, args.log_format);

    let mut config = load_config(args.config.as_deref(), args.data_dir.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let state = Arc::new(build_state(&config)?);
    let router = create_router(state, &config.cors.allowed_origins);

    HttpServer::new(&config.server.host, config.server.port, router)?
        .run()
        .await
}
