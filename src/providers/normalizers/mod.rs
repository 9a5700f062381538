//! Per-provider payload normalizers
//!
//! Each normalizer turns one provider's raw JSON payload into canonical
//! descriptors. A payload whose top-level shape is wrong is an error; a bad
//! individual item is recovered (or skipped) with a warning and never aborts
//! the batch.

pub mod aitempl;
pub mod canonical;

pub use aitempl::AitemplNormalizer;
pub use canonical::CanonicalNormalizer;

use crate::catalog::CanonicalDescriptor;
use crate::utils::errors::CatalogResult;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

pub trait SourceNormalizer: Send + Sync {
    /// Registry key of this normalizer
    fn name(&self) -> &str;

    fn normalize(
        &self,
        payload: &Value,
        provider_id: &str,
    ) -> CatalogResult<Vec<CanonicalDescriptor>>;
}

/// Normalizers keyed by name
#[derive(Clone, Default)]
pub struct NormalizerRegistry {
    normalizers: HashMap<String, Arc<dyn SourceNormalizer>>,
}

impl NormalizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in normalizer
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(AitemplNormalizer));
        registry.register(Arc::new(CanonicalNormalizer));
        registry
    }

    pub fn register(&mut self, normalizer: Arc<dyn SourceNormalizer>) {
        self.normalizers
            .insert(normalizer.name().to_string(), normalizer);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SourceNormalizer>> {
        self.normalizers.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.normalizers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for NormalizerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizerRegistry")
            .field("normalizers", &self.names())
            .finish()
    }
}
