//! # Observability
//!
//! Structured JSON logging and the request-scoped context that stamps a
//! request id onto every line emitted while handling a request.

pub mod context;
pub mod logger;

pub use context::RequestContext;
pub use logger::{Logger, Severity};
