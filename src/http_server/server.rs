//! # HTTP Server
//!
//! Main HTTP server combining the page, layer and health routers.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::LayerSource;

use super::config::HttpServerConfig;
use super::layer_routes::{layer_routes, LayerState};
use super::observability_routes::health_routes;
use super::page_routes::{page_routes, PageState};

/// HTTP server for the layer map
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server reading layers from `source`
    pub fn new(config: HttpServerConfig, source: Arc<dyn LayerSource>) -> Self {
        let router = Self::build_router(&config, source);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    pub fn build_router(config: &HttpServerConfig, source: Arc<dyn LayerSource>) -> Router {
        let layer_state = Arc::new(LayerState::new(source));
        let page_state = Arc::new(PageState::new(config.page_path.clone()));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
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
            .merge(page_routes(page_state, config.static_dir.clone()))
            .merge(layer_routes(layer_state))
            .merge(health_routes())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        info!(addr = %listener.local_addr()?, "layer server listening");
        info!("endpoints: / /layers /layer_data?name=<layer> /static/* /health");

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
