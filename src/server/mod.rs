//! # HTTP Relay
//!
//! Exposes the analyzer over HTTP:
//!
//! - `GET /api/files?repo=<url>` lists source files of a repository
//! - `POST /api/analyze` analyzes a selection of files
//! - `GET /health` liveness check
//!
//! Everything else is served from the static UI directory when one is
//! configured. Cross-origin requests are allowed from any origin.

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{AnalyzeRequest, AnalyzeResponse, FilesQuery, FilesResponse};

use crate::analyzer::Analyzer;
use crate::config::Config;
use crate::error::Result;
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

/// Port the relay listens on unless told otherwise
pub const DEFAULT_PORT: u16 = 3001;

/// Options controlling how the relay is exposed
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Address to bind
    pub bind_addr: SocketAddr,

    /// Directory holding the Selection UI
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            static_dir: None,
        }
    }
}

/// The relay server
pub struct Server {
    options: ServerOptions,
    app: Router,
}

impl Server {
    /// Create a server whose collaborators are built from `config`
    pub fn new(config: &Config, options: ServerOptions) -> Result<Self> {
        let analyzer = Analyzer::from_config(config)?;
        let app = build_app(analyzer, options.static_dir.clone());
        Ok(Self { options, app })
    }

    /// Bind the listener and serve until Ctrl-C
    pub async fn run(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.options.bind_addr).await?;
        info!("Server running on {}", listener.local_addr()?);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }

    /// Address the server binds to
    pub fn addr(&self) -> SocketAddr {
        self.options.bind_addr
    }
}

/// Build the router with routes, CORS and request tracing
pub fn build_app(analyzer: Analyzer, static_dir: Option<PathBuf>) -> Router {
    let api_routes = Router::new()
        .route("/api/files", get(handlers::list_files))
        .route("/api/analyze", post(handlers::analyze))
        .route("/health", get(handlers::health))
        .with_state(analyzer);

    let app = match static_dir {
        Some(dir) => api_routes.fallback_service(ServeDir::new(dir)),
        None => api_routes,
    };

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
