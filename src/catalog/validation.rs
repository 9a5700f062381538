//! Offline validation of the descriptor tree
//!
//! Unlike [`ServiceRegistry::build`](crate::catalog::ServiceRegistry::build),
//! which stops at the first bad file, the validator checks every file and
//! reports all problems.

use crate::catalog::registry::{sorted_descriptor_files, sorted_service_dirs, META_FILE};
use crate::catalog::types::{CanonicalDescriptor, ServiceMeta};
use crate::utils::errors::CatalogResult;
use schemars::schema_for;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use validator::{Validate, ValidationErrors};

/// Validation outcome for one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// Path relative to the descriptor root
    pub file: String,
    pub errors: Vec<String>,
}

impl FileReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct DescriptorValidator {
    schema: Value,
}

impl Default for DescriptorValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorValidator {
    pub fn new() -> Self {
        let schema = schema_for!(CanonicalDescriptor);
        Self {
            schema: serde_json::to_value(&schema).unwrap_or_default(),
        }
    }

    /// JSON Schema of the canonical descriptor
    pub fn get_schema(&self) -> &Value {
        &self.schema
    }

    pub fn export_schema(&self) -> String {
        serde_json::to_string_pretty(&self.schema).unwrap_or_default()
    }

    /// Validate one descriptor document, returning every problem found.
    pub fn validate_descriptor(&self, content: &str) -> Result<CanonicalDescriptor, Vec<String>> {
        let descriptor: CanonicalDescriptor = serde_json::from_str(content)
            .map_err(|e| vec![format!("Parse error: {}", e)])?;

        let mut errors = Vec::new();
        if let Err(e) = descriptor.validate() {
            collect_field_errors("", &e, &mut errors);
        }
        if let Some(maintainer) = &descriptor.maintainer {
            if let Err(e) = maintainer.validate() {
                collect_field_errors("maintainer.", &e, &mut errors);
            }
        }
        if let Some(metadata) = &descriptor.metadata {
            if let Err(e) = metadata.validate() {
                collect_field_errors("metadata.", &e, &mut errors);
            }
        }
        if let Err(message) = descriptor.check_template() {
            errors.push(format!("configuration.template: {}", message));
        }

        if errors.is_empty() {
            Ok(descriptor)
        } else {
            Err(errors)
        }
    }

    pub fn validate_meta(&self, content: &str) -> Result<ServiceMeta, Vec<String>> {
        let meta: ServiceMeta =
            serde_json::from_str(content).map_err(|e| vec![format!("Parse error: {}", e)])?;
        let mut errors = Vec::new();
        if let Err(e) = meta.validate() {
            collect_field_errors("", &e, &mut errors);
        }
        if errors.is_empty() {
            Ok(meta)
        } else {
            Err(errors)
        }
    }

    /// Validate every metadata and descriptor file under `root`.
    pub fn validate_tree(&self, root: &Path) -> CatalogResult<Vec<FileReport>> {
        let mut reports = Vec::new();
        let mut seen_ids: HashMap<String, String> = HashMap::new();

        for (service, dir) in sorted_service_dirs(root)? {
            let meta_path = dir.join(META_FILE);
            let has_meta = meta_path.is_file();
            if has_meta {
                let errors = match std::fs::read_to_string(&meta_path) {
                    Ok(content) => self.validate_meta(&content).err().unwrap_or_default(),
                    Err(e) => vec![format!("Failed to read file: {}", e)],
                };
                reports.push(FileReport {
                    file: format!("{}/{}", service, META_FILE),
                    errors,
                });
            }

            for path in sorted_descriptor_files(&dir)? {
                let file_name = path
                    .file_name()
                    .map(|f| f.to_string_lossy().to_string())
                    .unwrap_or_default();
                let file = format!("{}/{}", service, file_name);

                let mut errors = match std::fs::read_to_string(&path) {
                    Ok(content) => match self.validate_descriptor(&content) {
                        Ok(descriptor) => {
                            let mut errors = Vec::new();
                            if let Some(first) = seen_ids.get(&descriptor.id) {
                                errors.push(format!(
                                    "Duplicate id '{}' (first defined in {})",
                                    descriptor.id, first
                                ));
                            } else {
                                seen_ids.insert(descriptor.id.clone(), file.clone());
                            }
                            errors
                        }
                        Err(errors) => errors,
                    },
                    Err(e) => vec![format!("Failed to read file: {}", e)],
                };
                if !has_meta {
                    errors.push(format!("No {} in service directory; file is never served", META_FILE));
                }

                reports.push(FileReport { file, errors });
            }
        }

        Ok(reports)
    }
}

fn collect_field_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors.iter() {
            messages.push(format!("{}{}: {}", prefix, field, error.code));
        }
    }
    messages.sort();
    out.extend(messages);
}
