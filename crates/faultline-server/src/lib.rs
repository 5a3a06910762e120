//! HTTP and gRPC adapters for faultline errors
//!
//! [`RpcErrorLayer`] converts structured errors into gRPC statuses on the
//! way out of a service; [`HttpErrorResponse`] and [`ClassifiedResponse`]
//! render them for axum. [`Server`] serves the translation tables for
//! inspection.

#![allow(clippy::must_use_candidate)]

mod inspect;
mod response;
mod rpc_boundary;

use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post};
use faultline_config::Config;
use tower_http::trace::TraceLayer;

pub use response::{ClassifiedResponse, HttpErrorResponse};
pub use rpc_boundary::{RpcErrorLayer, RpcErrorService, to_rpc_boundary};

/// Inspection server with its routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    pub fn new(config: &Config) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let mut app = Router::new()
            .route("/codes/{code}", get(inspect::code_handler))
            .route("/decode", post(inspect::decode_handler));

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(inspect::health_handler));
        }

        app = app.layer(TraceLayer::new_for_http());

        Self {
            router: app,
            listen_address,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
