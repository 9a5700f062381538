//! AITempl catalog format
//!
//! AITempl ships each server as a flat record whose `content` field is a
//! JSON *string* holding a Claude-style `mcp.json` document:
//!
//! ```json
//! {"name": "filesystem", "content": "{\"mcpServers\": {\"fs\": {\"command\": \"npx\", ...}}}", ...}
//! ```
use super::SourceNormalizer;
use crate::catalog::types::{
    CanonicalDescriptor, Configuration, ConfigurationTemplate, DescriptorMetadata,
    DescriptorStatus, InputDefinition, InputType, Source, StdioTemplate, Transport,
};
use crate::utils::errors::{CatalogError, CatalogResult};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub const DEFAULT_COMMAND: &str = "npx";
pub const DEFAULT_CATEGORY: &str = "general";

/// One record of an AITempl payload. Every field is optional on the wire and
/// a field of the wrong type reads as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AitemplServer {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub downloads: Option<u64>,
    pub logo_url: Option<String>,
}

impl AitemplServer {
    /// Read a record field by field. A missing or unusable name becomes
    /// `unnamed-<position>`.
    pub fn from_record(record: &Map<String, Value>, position: usize) -> Self {
        let text = |key: &str| record.get(key).and_then(Value::as_str).map(str::to_string);

        let name = text("name")
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("unnamed-{}", position));
        let downloads = record.get("downloads").and_then(|d| {
            d.as_u64()
                .or_else(|| d.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))
        });

        Self {
            name,
            description: text("description"),
            category: text("category"),
            content: text("content"),
            downloads,
            logo_url: text("logoUrl"),
        }
    }
}

pub struct AitemplNormalizer;

impl AitemplNormalizer {
    fn fallback() -> StdioTemplate {
        StdioTemplate {
            command: DEFAULT_COMMAND.to_string(),
            args: Vec::new(),
            env: IndexMap::new(),
        }
    }

    /// Extract the launch template from the embedded content string, falling
    /// back to `npx` with no args or env when it cannot be read.
    pub fn parse_content(server_name: &str, content: &str) -> StdioTemplate {
        let parsed: Value = match serde_json::from_str(content) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Failed to parse AITempl content for {}: {}", server_name, e);
                return Self::fallback();
            }
        };

        let Some(servers) = parsed.get("mcpServers").and_then(Value::as_object) else {
            warn!("AITempl content for {} has no mcpServers", server_name);
            return Self::fallback();
        };

        // Only the first server of a multi-server entry is used.
        let mut iter = servers.iter();
        let Some((key, value)) = iter.next() else {
            warn!("AITempl content for {} has an empty mcpServers map", server_name);
            return Self::fallback();
        };
        let dropped: Vec<&String> = iter.map(|(k, _)| k).collect();
        if !dropped.is_empty() {
            warn!(
                "AITempl entry {} declares {} servers; using '{}', ignoring {:?}",
                server_name,
                dropped.len() + 1,
                key,
                dropped
            );
        }

        let Some(entry) = value.as_object() else {
            warn!("AITempl server '{}' in {} is not an object", key, server_name);
            return Self::fallback();
        };

        StdioTemplate {
            command: entry
                .get("command")
                .and_then(Value::as_str)
                .filter(|c| !c.is_empty())
                .unwrap_or(DEFAULT_COMMAND)
                .to_string(),
            args: Self::entry_args(key, entry.get("args")),
            env: Self::entry_env(key, entry.get("env")),
        }
    }

    fn entry_args(key: &str, args: Option<&Value>) -> Vec<String> {
        let Some(args) = args else {
            return Vec::new();
        };
        let Some(items) = args.as_array() else {
            warn!("AITempl server '{}' has non-array args; ignoring them", key);
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|arg| {
                let text = scalar_text(arg);
                if text.is_none() {
                    warn!("AITempl server '{}' has a non-scalar arg {}; skipping it", key, arg);
                }
                text
            })
            .collect()
    }

    fn entry_env(key: &str, env: Option<&Value>) -> IndexMap<String, String> {
        let Some(env) = env else {
            return IndexMap::new();
        };
        let Some(vars) = env.as_object() else {
            warn!("AITempl server '{}' has a non-object env; ignoring it", key);
            return IndexMap::new();
        };
        vars.iter()
            .filter_map(|(name, value)| match scalar_text(value) {
                Some(text) => Some((name.clone(), text)),
                None => {
                    warn!("AITempl server '{}' env {} is not a scalar; skipping it", key, name);
                    None
                }
            })
            .collect()
    }

    /// Every declared environment variable becomes a required string input.
    pub fn env_inputs(env: &IndexMap<String, String>) -> IndexMap<String, InputDefinition> {
        env.iter()
            .map(|(key, value)| {
                (
                    key.clone(),
                    InputDefinition {
                        label: key.clone(),
                        required: true,
                        input_type: InputType::String,
                        default: Some(value.clone()),
                        description: Some(format!("Environment variable: {}", key)),
                    },
                )
            })
            .collect()
    }

    pub fn normalize_server(server: AitemplServer, provider_id: &str) -> CanonicalDescriptor {
        let template = match server.content.as_deref() {
            Some(content) => Self::parse_content(&server.name, content),
            None => {
                warn!("AITempl server {} has no content string", server.name);
                Self::fallback()
            }
        };
        let inputs = Self::env_inputs(&template.env);

        CanonicalDescriptor {
            schema: None,
            id: format!("{}-{}", provider_id, server.name),
            name: server.name,
            display_name: None,
            description: server.description.unwrap_or_default(),
            category: server
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            icon: "server".to_string(),
            logo_url: server.logo_url,
            source: Source::Community,
            maintainer: None,
            status: DescriptorStatus::Active,
            version: "latest".to_string(),
            transport: Transport::Stdio,
            inputs,
            configuration: Configuration {
                template: ConfigurationTemplate::Stdio(template),
            },
            metadata: Some(DescriptorMetadata {
                use_count: server.downloads,
                ..Default::default()
            }),
            provider: Some(provider_id.to_string()),
        }
    }
}

/// Strings pass through, numbers and booleans are rendered, null is empty.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

impl SourceNormalizer for AitemplNormalizer {
    fn name(&self) -> &str {
        "aitempl"
    }

    fn normalize(
        &self,
        payload: &Value,
        provider_id: &str,
    ) -> CatalogResult<Vec<CanonicalDescriptor>> {
        let items = payload
            .get("mcps")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                CatalogError::InvalidPayload(format!(
                    "payload from {} has no 'mcps' array",
                    provider_id
                ))
            })?;

        let mut descriptors = Vec::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            let Some(record) = item.as_object() else {
                warn!(
                    "Skipping AITempl item {} from {}: not a server record",
                    position, provider_id
                );
                continue;
            };
            let server = AitemplServer::from_record(record, position);
            descriptors.push(Self::normalize_server(server, provider_id));
        }

        debug!("Normalized {} AITempl servers from {}", descriptors.len(), provider_id);
        Ok(descriptors)
    }
}
