//! # HTTP Server
//!
//! Combines the endpoint routers with CORS and the request middleware and
//! owns the listen/shutdown lifecycle.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::Logger;
use crate::sequence::SequenceStore;

use super::config::HttpServerConfig;
use super::health_routes::health_routes;
use super::middleware::{access_log, request_id};
use super::sequence_routes::{sequence_routes, SequenceState};

/// HTTP server for the sequence API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server from a configuration and the shared sequence state
    pub fn new<S: SequenceStore + 'static>(
        config: HttpServerConfig,
        state: Arc<SequenceState<S>>,
    ) -> Self {
        let router = build_router(&config, state);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until `shutdown` resolves.
    pub async fn start<F>(self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

        let listener = TcpListener::bind(addr).await?;
        Logger::info("api server listening", &[("addr", &addr.to_string())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

/// Build the combined router with all endpoints and middleware.
///
/// `request_id` is layered outermost so the access log and every handler
/// see the tagged request.
pub fn build_router<S: SequenceStore + 'static>(
    config: &HttpServerConfig,
    state: Arc<SequenceState<S>>,
) -> Router {
    let cors = if config.cors_origins.is_empty() {
        // No origins configured: permissive, for development
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(health_routes())
        .merge(sequence_routes(state))
        .layer(cors)
        .layer(middleware::from_fn(access_log))
        .layer(middleware::from_fn(request_id))
}
