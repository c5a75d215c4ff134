//! # HTTP Transport
//!
//! Routing, request middleware, error mapping and the server lifecycle
//! for the sequence API.

pub mod config;
pub mod errors;
pub mod health_routes;
pub mod middleware;
pub mod sequence_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorBody};
pub use sequence_routes::{sequence_routes, SequenceState};
pub use server::{build_router, HttpServer};
