//! HTTP surface of the catalog

pub mod announcements;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;

pub use routes::StoreResponse;
pub use server::{create_router, AppState, HttpServer};
