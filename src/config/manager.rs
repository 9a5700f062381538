use crate::config::{Config, ConfigValidator};
use crate::utils::errors::{CatalogError, CatalogResult};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::path::Path;
use tracing::{debug, info};

/// Prefix of environment overrides; `__` separates nested keys
/// (`MCP_CATALOG_SERVER__PORT=8080`).
pub const ENV_PREFIX: &str = "MCP_CATALOG_";

impl Config {
    /// Layered sources: defaults, then the TOML file, then environment.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&["SUPABASE_URL"])
                    .map(|_| "announcements.url".into()),
            )
            .merge(
                Env::raw()
                    .only(&["SUPABASE_SERVICE_ROLE_KEY"])
                    .map(|_| "announcements.service_role_key".into()),
            )
    }

    pub fn from_figment(figment: Figment) -> CatalogResult<Self> {
        let config: Config = figment
            .extract()
            .map_err(|e| CatalogError::ConfigError(e.to_string()))?;

        ConfigValidator::new().validate_config(&config).map_err(|errors| {
            CatalogError::ConfigError(
                errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;
        Ok(config)
    }

    /// Load configuration. An explicitly given file must exist.
    pub fn load(path: Option<&Path>) -> CatalogResult<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(CatalogError::ConfigError(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            info!("Loading configuration from {}", path.display());
        } else {
            debug!("No configuration file, using defaults and environment");
        }
        Self::from_figment(Self::figment(path))
    }

    /// Like `load`, but a missing file falls back to defaults.
    pub fn load_or_default(path: &Path) -> CatalogResult<Self> {
        if path.exists() {
            Self::load(Some(path))
        } else {
            debug!("{} not found, using defaults", path.display());
            Self::load(None)
        }
    }
}
