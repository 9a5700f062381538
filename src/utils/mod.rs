pub mod errors;
pub mod logging;
pub mod shutdown;

pub use errors::{CatalogError, CatalogResult};
pub use logging::{init_logging, LogFormat};
pub use shutdown::shutdown_signal;
