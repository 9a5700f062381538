//! Provider synchronization
//!
//! Fetches each configured provider, runs its normalizer and merges the
//! results. A provider that fails is logged and left out of `sync_all`; the
//! single-provider calls surface the error instead.
use crate::catalog::{CanonicalDescriptor, CatalogAggregator};
use crate::providers::fetch::ProviderFetcher;
use crate::providers::normalizers::{CanonicalNormalizer, NormalizerRegistry};
use crate::providers::types::{ProviderConfig, ProviderKind};
use crate::utils::errors::{CatalogError, CatalogResult};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, Instrument};

/// Where a provider sync currently stands (or where it stopped)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Pending,
    Fetching,
    Normalizing,
    Done,
    Failed,
}

impl SyncPhase {
    /// Terminal phase for a finished sync
    pub fn settled<T>(result: &CatalogResult<T>) -> Self {
        match result {
            Ok(_) => SyncPhase::Done,
            Err(_) => SyncPhase::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SyncPhase::Done | SyncPhase::Failed)
    }
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = match self {
            SyncPhase::Pending => "pending",
            SyncPhase::Fetching => "fetching",
            SyncPhase::Normalizing => "normalizing",
            SyncPhase::Done => "done",
            SyncPhase::Failed => "failed",
        };
        f.write_str(phase)
    }
}

pub struct ProviderSyncService {
    providers: Vec<ProviderConfig>,
    catalog: Arc<CatalogAggregator>,
    fetcher: Arc<dyn ProviderFetcher>,
    normalizers: NormalizerRegistry,
}

impl ProviderSyncService {
    pub fn new(
        providers: Vec<ProviderConfig>,
        catalog: Arc<CatalogAggregator>,
        fetcher: Arc<dyn ProviderFetcher>,
    ) -> Self {
        Self::with_normalizers(providers, catalog, fetcher, NormalizerRegistry::with_defaults())
    }

    pub fn with_normalizers(
        providers: Vec<ProviderConfig>,
        catalog: Arc<CatalogAggregator>,
        fetcher: Arc<dyn ProviderFetcher>,
        normalizers: NormalizerRegistry,
    ) -> Self {
        Self {
            providers,
            catalog,
            fetcher,
            normalizers,
        }
    }

    /// Enabled providers in configuration order
    pub fn providers(&self) -> Vec<&ProviderConfig> {
        self.providers.iter().filter(|p| p.enabled).collect()
    }

    pub fn provider(&self, id: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.enabled && p.id == id)
    }

    pub async fn sync_provider(&self, id: &str) -> CatalogResult<Vec<CanonicalDescriptor>> {
        let provider = self
            .provider(id)
            .ok_or_else(|| CatalogError::ProviderNotFound(id.to_string()))?;
        self.sync(provider).await
    }

    /// Sync every enabled provider concurrently. Failures are logged and
    /// excluded; the surviving results keep provider order.
    pub async fn sync_all(&self) -> Vec<CanonicalDescriptor> {
        let providers = self.providers();
        let results = join_all(providers.iter().map(|p| self.sync(p))).await;

        let mut merged = Vec::new();
        let mut failed = 0usize;
        for (provider, result) in providers.iter().zip(results) {
            match result {
                Ok(descriptors) => merged.extend(descriptors),
                Err(e) => {
                    failed += 1;
                    error!("Provider {} excluded from sync: {}", provider.id, e);
                }
            }
        }

        info!(
            "Synced {} descriptors from {} providers ({} failed)",
            merged.len(),
            providers.len() - failed,
            failed
        );
        merged
    }

    /// First match in provider order
    pub async fn find_server(&self, id: &str) -> Option<CanonicalDescriptor> {
        self.sync_all().await.into_iter().find(|d| d.id == id)
    }

    async fn sync(&self, provider: &ProviderConfig) -> CatalogResult<Vec<CanonicalDescriptor>> {
        let span = info_span!("provider_sync", provider = %provider.id, kind = %provider.kind);
        let result = async {
            let mut phase = SyncPhase::Pending;
            debug!("Sync {}", phase);

            let descriptors = match provider.kind {
                ProviderKind::Local => CanonicalNormalizer::tag(
                    self.catalog.aggregate_all().into_iter().cloned(),
                    &provider.id,
                ),
                ProviderKind::Api => {
                    let key = provider.normalizer_key();
                    let normalizer = self
                        .normalizers
                        .get(key)
                        .ok_or_else(|| CatalogError::NoNormalizer(key.to_string()))?;

                    phase = SyncPhase::Fetching;
                    let payload = self.fetcher.fetch(provider).await.map_err(|e| {
                        CatalogError::ProviderSync {
                            provider: provider.id.clone(),
                            phase,
                            message: e.to_string(),
                        }
                    })?;

                    phase = SyncPhase::Normalizing;
                    normalizer.normalize(&payload, &provider.id).map_err(|e| {
                        CatalogError::ProviderSync {
                            provider: provider.id.clone(),
                            phase,
                            message: e.to_string(),
                        }
                    })?
                }
            };

            Ok::<_, CatalogError>(descriptors)
        }
        .instrument(span.clone())
        .await;

        let settled = SyncPhase::settled(&result);
        span.in_scope(|| match &result {
            Ok(descriptors) => debug!("Sync {} with {} descriptors", settled, descriptors.len()),
            Err(e) => debug!("Sync {}: {}", settled, e),
        });
        result
    }
}
