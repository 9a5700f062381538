//! MCP Catalog: read-only HTTP catalog of MCP server descriptors

pub mod announcements;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod providers;
pub mod utils;

pub use config::Config;
