//! Canonical descriptor types for the MCP catalog
use schemars::JsonSchema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where a descriptor comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Created and maintained by the service vendor
    Official,
    /// Contributed by a third party
    Community,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Official => write!(f, "official"),
            Source::Community => write!(f, "community"),
        }
    }
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "official" => Ok(Source::Official),
            "community" => Ok(Source::Community),
            other => Err(format!("unknown source '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorStatus {
    #[default]
    Active,
    Deprecated,
    Experimental,
}

/// Connection mechanism targeted by a descriptor's template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Transport {
    /// Local process via stdio
    Stdio,
    /// Server-Sent Events
    Sse,
    /// Streamable HTTP
    StreamableHttp,
}

impl Transport {
    pub fn is_http(&self) -> bool {
        matches!(self, Transport::Sse | Transport::StreamableHttp)
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transport::Stdio => write!(f, "stdio"),
            Transport::Sse => write!(f, "sse"),
            Transport::StreamableHttp => write!(f, "streamable-http"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    String,
    Password,
    Number,
    Boolean,
}

/// A user-supplied parameter needed before a template can be instantiated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InputDefinition {
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "type", default)]
    pub input_type: InputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct Maintainer {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Template for launching a local process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StdioTemplate {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: IndexMap<String, String>,
}

/// Template for connecting to a remote endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HttpTemplate {
    #[serde(rename = "type")]
    pub kind: Transport,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, String>>,
}

/// Connection template; the variant must agree with the descriptor's transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ConfigurationTemplate {
    Stdio(StdioTemplate),
    Http(HttpTemplate),
}

impl ConfigurationTemplate {
    pub fn as_stdio(&self) -> Option<&StdioTemplate> {
        match self {
            ConfigurationTemplate::Stdio(t) => Some(t),
            ConfigurationTemplate::Http(_) => None,
        }
    }

    pub fn as_http(&self) -> Option<&HttpTemplate> {
        match self {
            ConfigurationTemplate::Http(t) => Some(t),
            ConfigurationTemplate::Stdio(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Configuration {
    pub template: ConfigurationTemplate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_count: Option<u64>,
}

/// The unit of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalDescriptor {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    /// Original display name, set when `name` is rewritten for strict clients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[validate(length(min = 1))]
    pub description: String,
    pub category: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub logo_url: Option<String>,
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainer: Option<Maintainer>,
    #[serde(default)]
    pub status: DescriptorStatus,
    pub version: String,
    pub transport: Transport,
    #[serde(default)]
    pub inputs: IndexMap<String, InputDefinition>,
    pub configuration: Configuration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DescriptorMetadata>,
    /// Origin tag carried through multi-provider aggregation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl CanonicalDescriptor {
    pub fn template(&self) -> &ConfigurationTemplate {
        &self.configuration.template
    }

    /// Check that the template variant matches the transport tag.
    pub fn check_template(&self) -> Result<(), String> {
        match (&self.transport, &self.configuration.template) {
            (Transport::Stdio, ConfigurationTemplate::Stdio(_)) => Ok(()),
            (Transport::Stdio, ConfigurationTemplate::Http(_)) => Err(
                "transport 'stdio' requires a command template, found a url template".to_string(),
            ),
            (transport, ConfigurationTemplate::Http(http)) if http.kind == *transport => Ok(()),
            (transport, ConfigurationTemplate::Http(http)) => Err(format!(
                "transport '{}' does not match template type '{}'",
                transport, http.kind
            )),
            (transport, ConfigurationTemplate::Stdio(_)) => Err(format!(
                "transport '{}' requires a url template, found a command template",
                transport
            )),
        }
    }

    /// Copy with `name` made safe for strict function-name consumers and the
    /// original kept in `displayName`.
    pub fn with_normalized_name(&self) -> Self {
        let mut out = self.clone();
        out.display_name = Some(self.display_name.clone().unwrap_or_else(|| self.name.clone()));
        out.name = crate::catalog::naming::normalize_name(&self.name);
        out
    }
}

/// Per-service metadata (`_meta.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMeta {
    #[validate(length(min = 1))]
    pub service: String,
    pub display_name: String,
    pub description: String,
    #[validate(url)]
    pub website: Option<String>,
    pub icon: String,
    pub category: String,
}

/// Tally of descriptors per source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCounts {
    pub official: usize,
    pub community: usize,
}

impl SourceCounts {
    pub fn total(&self) -> usize {
        self.official + self.community
    }
}
