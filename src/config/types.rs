use crate::providers::{ProviderConfig, ProviderKind};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,
    #[serde(default)]
    pub http_client: HttpClientConfig,
    #[serde(default)]
    pub announcements: AnnouncementsConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(default)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CatalogConfig {
    /// Root of the descriptor tree, one directory per service
    pub data_dir: PathBuf,
    /// Serve the merged provider catalog from `/api/mcps.json`
    pub aggregate_providers: bool,
    pub store: StoreInfo,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/mcps"),
            aggregate_providers: false,
            store: StoreInfo::default(),
        }
    }
}

/// Identity advertised in the `provider` block of catalog responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(default)]
pub struct StoreInfo {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub homepage: Option<String>,
}

impl Default for StoreInfo {
    fn default() -> Self {
        Self {
            id: "levante-api-services".to_string(),
            name: "Levante API Services".to_string(),
            homepage: Some("https://github.com/levante-hub/Levante-Store".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(default)]
pub struct HttpClientConfig {
    #[validate(length(min = 1))]
    pub user_agent: String,
    /// Unset means no client-side timeout
    pub timeout_secs: Option<u64>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnnouncementsConfig {
    pub url: Option<String>,
    pub service_role_key: Option<String>,
    pub table: String,
}

impl Default for AnnouncementsConfig {
    fn default() -> Self {
        Self {
            url: None,
            service_role_key: None,
            table: "announcements".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(default)]
pub struct CorsConfig {
    /// Empty allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            catalog: CatalogConfig::default(),
            providers: default_providers(),
            http_client: HttpClientConfig::default(),
            announcements: AnnouncementsConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![ProviderConfig {
        id: "levante".to_string(),
        name: "Levante".to_string(),
        description: "Curated local catalog".to_string(),
        kind: ProviderKind::Local,
        endpoint: String::new(),
        enabled: true,
        homepage: Some("https://github.com/levante-hub/Levante-Store".to_string()),
        normalizer: None,
    }]
}
