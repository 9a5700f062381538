//! CLI argument types - shared between binary and tests

use crate::catalog::Source;
use crate::utils::logging::LogFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mcp-catalog")]
#[command(about = "Read-only catalog of MCP server descriptors")]
#[command(version)]
pub enum Cli {
    /// Start the catalog HTTP server
    Serve(ServeArgs),
    /// Print the local catalog grouped by service
    List(ListArgs),
    /// Check every descriptor file in the data directory
    Validate(ValidateArgs),
    /// Print a JSON Schema
    Schema(SchemaArgs),
}

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Configuration file path
    #[arg(short, long, env = "MCP_CATALOG_CONFIG")]
    pub config: Option<String>,
    /// Host to bind to (overrides config)
    #[arg(short = 'H', long)]
    pub host: Option<String>,
    /// Port to bind to (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Descriptor tree root (overrides config)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Configuration file path
    #[arg(short, long, env = "MCP_CATALOG_CONFIG")]
    pub config: Option<String>,
    /// Descriptor tree root (overrides config)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
    /// Only descriptors from this source
    #[arg(long)]
    pub source: Option<Source>,
    /// Only descriptors of this service
    #[arg(long)]
    pub service: Option<String>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Descriptor tree root
    #[arg(short, long, default_value = "data/mcps")]
    pub data_dir: PathBuf,
}

#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Print the configuration schema instead of the descriptor schema
    #[arg(long)]
    pub config: bool,
}
