//! HTTP server middleware

pub mod cors;
pub mod errors;

pub use cors::{catalog_cors, restrictive_cors};
pub use errors::{handle_panic, not_found};
