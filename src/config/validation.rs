//! Configuration validation using JSON Schema

use crate::config::Config;
use crate::providers::ProviderKind;
use schemars::schema_for;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use validator::{Validate, ValidationErrors};

/// Validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Configuration validator
pub struct ConfigValidator {
    schema: Value,
}

impl ConfigValidator {
    pub fn new() -> Self {
        let schema = schema_for!(Config);
        Self {
            schema: serde_json::to_value(&schema).unwrap_or_default(),
        }
    }

    pub fn get_schema(&self) -> &Value {
        &self.schema
    }

    pub fn export_schema(&self) -> String {
        serde_json::to_string_pretty(&self.schema).unwrap_or_default()
    }

    /// Validate a configuration file on disk
    pub fn validate_file(&self, path: &Path) -> Result<(), Vec<ValidationError>> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            vec![ValidationError {
                path: path.display().to_string(),
                message: format!("Failed to read file: {}", e),
            }]
        })?;
        self.validate_toml(&content)
    }

    pub fn validate_toml(&self, content: &str) -> Result<(), Vec<ValidationError>> {
        let config: Config = toml::from_str(content).map_err(|e| {
            vec![ValidationError {
                path: "root".to_string(),
                message: format!("TOML parse error: {}", e),
            }]
        })?;
        self.validate_config(&config)
    }

    pub fn validate_config(&self, config: &Config) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        push_field_errors("server", config.server.validate(), &mut errors);
        push_field_errors("catalog.store", config.catalog.store.validate(), &mut errors);
        push_field_errors("http_client", config.http_client.validate(), &mut errors);

        self.validate_providers(config, &mut errors);
        self.validate_cors(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_providers(&self, config: &Config, errors: &mut Vec<ValidationError>) {
        let mut ids = HashSet::new();

        for (idx, provider) in config.providers.iter().enumerate() {
            if provider.id.is_empty() {
                errors.push(ValidationError {
                    path: format!("providers[{}].id", idx),
                    message: "Provider id cannot be empty".to_string(),
                });
            }

            if !ids.insert(provider.id.as_str()) {
                errors.push(ValidationError {
                    path: format!("providers[{}].id", idx),
                    message: format!("Duplicate provider id: {}", provider.id),
                });
            }

            if provider.kind == ProviderKind::Api {
                if let Err(e) = url::Url::parse(&provider.endpoint) {
                    errors.push(ValidationError {
                        path: format!("providers[{}].endpoint", idx),
                        message: format!("API provider needs a valid endpoint URL: {}", e),
                    });
                }
            }
        }
    }

    fn validate_cors(&self, config: &Config, errors: &mut Vec<ValidationError>) {
        for (idx, origin) in config.cors.allowed_origins.iter().enumerate() {
            if url::Url::parse(origin).is_err() {
                errors.push(ValidationError {
                    path: format!("cors.allowed_origins[{}]", idx),
                    message: format!("Invalid origin: {}", origin),
                });
            }
        }
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn push_field_errors(
    prefix: &str,
    result: Result<(), ValidationErrors>,
    errors: &mut Vec<ValidationError>,
) {
    if let Err(validation_errors) = result {
        for (field, field_errors) in validation_errors.field_errors() {
            for error in field_errors {
                errors.push(ValidationError {
                    path: format!("{}.{}", prefix, field),
                    message: error.code.to_string(),
                });
            }
        }
    }
}
