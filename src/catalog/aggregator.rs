//! Query engine over the service registry
use crate::catalog::registry::ServiceRegistry;
use crate::catalog::types::{CanonicalDescriptor, ServiceMeta, Source, SourceCounts};
use crate::utils::errors::CatalogResult;
use std::path::Path;

/// Read-only catalog queries. Every operation is a pure read over the
/// registry; `by_service` and `service_meta` are index lookups, everything
/// else walks the full descriptor list.
#[derive(Debug, Clone, Default)]
pub struct CatalogAggregator {
    registry: ServiceRegistry,
}

impl CatalogAggregator {
    pub fn new(registry: ServiceRegistry) -> Self {
        Self { registry }
    }

    /// Build the registry from a descriptor tree and wrap it.
    pub fn load(root: impl AsRef<Path>) -> CatalogResult<Self> {
        Ok(Self::new(ServiceRegistry::build(root)?))
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    fn iter(&self) -> impl Iterator<Item = &CanonicalDescriptor> {
        self.registry
            .entries()
            .iter()
            .flat_map(|entry| entry.descriptors.iter())
    }

    /// Every descriptor, services in construction order.
    pub fn aggregate_all(&self) -> Vec<&CanonicalDescriptor> {
        self.iter().collect()
    }

    /// Descriptors of one service; empty when the service is unknown.
    pub fn by_service(&self, service: &str) -> &[CanonicalDescriptor] {
        self.registry
            .get(service)
            .map(|entry| entry.descriptors.as_slice())
            .unwrap_or(&[])
    }

    pub fn by_source(&self, source: Source) -> Vec<&CanonicalDescriptor> {
        self.iter().filter(|d| d.source == source).collect()
    }

    /// First descriptor with this id in `aggregate_all` order.
    pub fn by_id(&self, id: &str) -> Option<&CanonicalDescriptor> {
        self.iter().find(|d| d.id == id)
    }

    pub fn services(&self) -> Vec<&ServiceMeta> {
        self.registry.entries().iter().map(|e| &e.meta).collect()
    }

    pub fn service_names(&self) -> Vec<&str> {
        self.registry
            .entries()
            .iter()
            .map(|e| e.name.as_str())
            .collect()
    }

    pub fn service_meta(&self, service: &str) -> Option<&ServiceMeta> {
        self.registry.get(service).map(|e| &e.meta)
    }

    pub fn count_by_source(&self) -> SourceCounts {
        self.iter().fold(SourceCounts::default(), |mut counts, d| {
            match d.source {
                Source::Official => counts.official += 1,
                Source::Community => counts.community += 1,
            }
            counts
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::registry::ServiceEntry;
    use crate::catalog::types::{Configuration, ConfigurationTemplate, StdioTemplate, Transport};

    fn meta(service: &str) -> ServiceMeta {
        ServiceMeta {
            service: service.to_string(),
            display_name: service.to_string(),
            description: String::new(),
            website: None,
            icon: "server".to_string(),
            category: "testing".to_string(),
        }
    }

    fn descriptor(id: &str, source: Source) -> CanonicalDescriptor {
        CanonicalDescriptor {
            schema: None,
            id: id.to_string(),
            name: id.to_string(),
            display_name: None,
            description: "test".to_string(),
            category: "testing".to_string(),
            icon: "server".to_string(),
            logo_url: None,
            source,
            maintainer: None,
            status: Default::default(),
            version: "1.0.0".to_string(),
            transport: Transport::Stdio,
            inputs: Default::default(),
            configuration: Configuration {
                template: ConfigurationTemplate::Stdio(StdioTemplate {
                    command: "npx".to_string(),
                    args: vec![],
                    env: Default::default(),
                }),
            },
            metadata: None,
            provider: None,
        }
    }

    fn aggregator() -> CatalogAggregator {
        let registry = ServiceRegistry::from_entries(vec![
            ServiceEntry {
                name: "alpha".to_string(),
                meta: meta("alpha"),
                descriptors: vec![
                    descriptor("alpha-1", Source::Official),
                    descriptor("alpha-2", Source::Community),
                ],
            },
            ServiceEntry {
                name: "beta".to_string(),
                meta: meta("beta"),
                descriptors: vec![descriptor("beta-1", Source::Official)],
            },
            ServiceEntry {
                name: "empty".to_string(),
                meta: meta("empty"),
                descriptors: vec![],
            },
        ])
        .unwrap();
        CatalogAggregator::new(registry)
    }

    #[test]
    fn test_aggregate_all_preserves_order() {
        let catalog = aggregator();
        let ids: Vec<_> = catalog.aggregate_all().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha-1", "alpha-2", "beta-1"]);
    }

    #[test]
    fn test_by_service() {
        let catalog = aggregator();
        assert_eq!(catalog.by_service("alpha").len(), 2);
        assert!(catalog.by_service("empty").is_empty());
        assert!(catalog.by_service("unknown").is_empty());
    }

    #[test]
    fn test_by_source_and_counts() {
        let catalog = aggregator();
        assert_eq!(catalog.by_source(Source::Official).len(), 2);
        assert_eq!(catalog.by_source(Source::Community).len(), 1);
        let counts = catalog.count_by_source();
        assert_eq!(counts, SourceCounts { official: 2, community: 1 });
        assert_eq!(counts.total(), catalog.aggregate_all().len());
    }

    #[test]
    fn test_by_id() {
        let catalog = aggregator();
        assert_eq!(catalog.by_id("beta-1").map(|d| d.id.as_str()), Some("beta-1"));
        assert!(catalog.by_id("missing").is_none());
    }

    #[test]
    fn test_service_listing() {
        let catalog = aggregator();
        assert_eq!(catalog.service_names(), vec!["alpha", "beta", "empty"]);
        assert_eq!(catalog.services().len(), 3);
        assert_eq!(catalog.service_meta("beta").unwrap().service, "beta");
        assert!(catalog.service_meta("nope").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected_in_memory() {
        let result = ServiceRegistry::from_entries(vec![
            ServiceEntry {
                name: "a".to_string(),
                meta: meta("a"),
                descriptors: vec![descriptor("dup", Source::Official)],
            },
            ServiceEntry {
                name: "b".to_string(),
                meta: meta("b"),
                descriptors: vec![descriptor("dup", Source::Community)],
            },
        ]);
        assert!(result.is_err());
    }
}
