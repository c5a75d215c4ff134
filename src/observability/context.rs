//! Request-scoped logging context.
//!
//! Carries the request id assigned by the HTTP layer so every log line
//! emitted while handling a request can be correlated. The context is
//! passed explicitly; there is no process-wide mutable log state.

use uuid::Uuid;

use super::logger::Logger;

/// Per-request log context.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
}

impl RequestContext {
    /// Create a context with a fresh request id
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
        }
    }

    /// Create a context for a known request id
    pub fn with_request_id(request_id: Uuid) -> Self {
        Self { request_id }
    }

    /// Log at INFO level with the request id attached
    pub fn info(&self, event: &str, fields: &[(&str, &str)]) {
        let request_id = self.request_id.to_string();
        let mut all = fields.to_vec();
        all.push(("request_id", request_id.as_str()));
        Logger::info(event, &all);
    }

    /// Log at WARN level with the request id attached
    pub fn warn(&self, event: &str, fields: &[(&str, &str)]) {
        let request_id = self.request_id.to_string();
        let mut all = fields.to_vec();
        all.push(("request_id", request_id.as_str()));
        Logger::warn(event, &all);
    }

    /// Log at ERROR level with the request id attached
    pub fn error(&self, event: &str, fields: &[(&str, &str)]) {
        let request_id = self.request_id.to_string();
        let mut all = fields.to_vec();
        all.push(("request_id", request_id.as_str()));
        Logger::error(event, &all);
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
