//! CLI command implementations

pub mod args;
pub mod list;
pub mod serve;
pub mod validate;

use crate::config::Config;
use crate::utils::errors::CatalogResult;
use std::path::{Path, PathBuf};

pub use args::Cli;

/// Get the default config path
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|p| p.join("mcp-catalog/config.toml"))
        .unwrap_or_else(|| PathBuf::from("~/.config/mcp-catalog/config.toml"))
}

/// Expand tilde in path
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}

/// Explicit `--config` must exist; the default location is optional.
pub fn load_config(explicit: Option<&str>, data_dir: Option<&Path>) -> CatalogResult<Config> {
    let mut config = match explicit {
        Some(path) => Config::load(Some(Path::new(&expand_path(path))))?,
        None => Config::load_or_default(&default_config_path())?,
    };
    if let Some(dir) = data_dir {
        config.catalog.data_dir = dir.to_path_buf();
    }
    Ok(config)
}
