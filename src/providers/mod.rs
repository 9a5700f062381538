//! External descriptor providers
pub mod fetch;
pub mod normalizers;
pub mod sync;
pub mod types;

pub use fetch::{HttpFetcher, ProviderFetcher};
pub use normalizers::{NormalizerRegistry, SourceNormalizer};
pub use sync::{ProviderSyncService, SyncPhase};
pub use types::{ProviderConfig, ProviderKind};
