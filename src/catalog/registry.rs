//! In-memory service registry built once from the descriptor tree
//!
//! Layout on disk:
//!
//! ```text
//! <root>/
//!   <service>/
//!     _meta.json        service metadata (required for the service to exist)
//!     <descriptor>.json one file per descriptor
//!     _<anything>.json  reserved, never loaded as data
//! ```
use crate::catalog::types::{CanonicalDescriptor, ServiceMeta};
use crate::utils::errors::{CatalogError, CatalogResult};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const META_FILE: &str = "_meta.json";

/// One service with its descriptors, in load order
#[derive(Debug, Clone)]
pub struct ServiceEntry {
    pub name: String,
    pub meta: ServiceMeta,
    pub descriptors: Vec<CanonicalDescriptor>,
}

/// Immutable index of services keyed by directory name
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    entries: Vec<ServiceEntry>,
    index: HashMap<String, usize>,
}

impl ServiceRegistry {
    /// Build from in-memory entries. Fails on duplicate service names or
    /// duplicate descriptor ids.
    pub fn from_entries(entries: Vec<ServiceEntry>) -> CatalogResult<Self> {
        Self::assemble(entries, |entry, _| PathBuf::from(&entry.name))
    }

    /// Index `entries`, rejecting repeated service names and descriptor ids.
    /// `locate` names the offending descriptor in the error.
    fn assemble(
        entries: Vec<ServiceEntry>,
        locate: impl Fn(&ServiceEntry, usize) -> PathBuf,
    ) -> CatalogResult<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        let mut seen_ids: HashMap<&str, &str> = HashMap::new();

        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.name.clone(), position).is_some() {
                return Err(CatalogError::ConfigError(format!(
                    "duplicate service '{}'",
                    entry.name
                )));
            }
            for (i, descriptor) in entry.descriptors.iter().enumerate() {
                if let Some(first) = seen_ids.insert(descriptor.id.as_str(), entry.name.as_str()) {
                    return Err(CatalogError::DuplicateDescriptorId {
                        id: descriptor.id.clone(),
                        path: locate(entry, i),
                        first_service: first.to_string(),
                    });
                }
            }
        }

        Ok(Self { entries, index })
    }

    /// Load the registry from `root`. Any unreadable or malformed file aborts
    /// the build.
    pub fn build(root: impl AsRef<Path>) -> CatalogResult<Self> {
        let root = root.as_ref();
        info!("Loading service registry from {}", root.display());

        let service_dirs = sorted_service_dirs(root)?;

        // Pass 1: a service exists iff its directory has metadata.
        let mut entries: Vec<ServiceEntry> = Vec::new();
        let mut files: Vec<Vec<PathBuf>> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for (name, dir) in &service_dirs {
            let meta_path = dir.join(META_FILE);
            if !meta_path.is_file() {
                debug!("Skipping {}: no {}", dir.display(), META_FILE);
                continue;
            }
            let meta: ServiceMeta = read_json(&meta_path)?;
            if meta.service != *name {
                warn!(
                    "Service metadata key '{}' differs from directory '{}'; using directory name",
                    meta.service, name
                );
            }
            positions.insert(name.as_str(), entries.len());
            entries.push(ServiceEntry {
                name: name.clone(),
                meta,
                descriptors: Vec::new(),
            });
            files.push(Vec::new());
        }

        // Pass 2: attach descriptors by parent directory.
        for (name, dir) in &service_dirs {
            let Some(&position) = positions.get(name.as_str()) else {
                continue;
            };
            for path in sorted_descriptor_files(dir)? {
                let descriptor: CanonicalDescriptor = read_json(&path)?;
                descriptor
                    .check_template()
                    .map_err(|message| CatalogError::InvalidDescriptor {
                        path: path.clone(),
                        message,
                    })?;
                debug!("Loaded descriptor {} from {}", descriptor.id, path.display());
                entries[position].descriptors.push(descriptor);
                files[position].push(path);
            }
        }

        let registry = Self::assemble(entries, |entry, i| {
            positions
                .get(entry.name.as_str())
                .and_then(|&p| files[p].get(i))
                .cloned()
                .unwrap_or_else(|| root.join(&entry.name))
        })?;
        info!(
            "Service registry ready: {} services, {} descriptors",
            registry.len(),
            registry.descriptor_count()
        );
        Ok(registry)
    }

    pub fn get(&self, service: &str) -> Option<&ServiceEntry> {
        self.index.get(service).map(|&i| &self.entries[i])
    }

    /// Entries in construction order
    pub fn entries(&self) -> &[ServiceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn descriptor_count(&self) -> usize {
        self.entries.iter().map(|e| e.descriptors.len()).sum()
    }
}

/// Immediate subdirectories of `root`, sorted by name.
pub(crate) fn sorted_service_dirs(root: &Path) -> CatalogResult<Vec<(String, PathBuf)>> {
    let read = std::fs::read_dir(root).map_err(|e| {
        CatalogError::ConfigError(format!(
            "Failed to read descriptor root {}: {}",
            root.display(),
            e
        ))
    })?;

    let mut dirs = Vec::new();
    for entry in read {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            dirs.push((name.to_string(), entry.path()));
        } else {
            warn!("Skipping non UTF-8 directory {}", entry.path().display());
        }
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}

/// `*.json` files in `dir` not starting with `_`, sorted by name.
pub(crate) fn sorted_descriptor_files(dir: &Path) -> CatalogResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if file_name.starts_with('_') || !file_name.ends_with(".json") {
            continue;
        }
        files.push(entry.path());
    }
    files.sort();
    Ok(files)
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> CatalogResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::InvalidDescriptor {
        path: path.to_path_buf(),
        message: format!("failed to read file: {}", e),
    })?;
    serde_json::from_str(&content).map_err(|e| CatalogError::InvalidDescriptor {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
