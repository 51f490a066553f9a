//! The default HTTP application mounted behind the TLS listener.
//!
//! Serves the Axum router over each authenticated connection, speaking
//! HTTP/1.1 or HTTP/2 as negotiated via ALPN. The listener treats this as an
//! opaque [`ConnectionHandler`]; any other handler can be injected in its
//! place.

use std::net::SocketAddr;

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnectionBuilder;
use hyper_util::service::TowerToHyperService;

use super::handler::{ConnectionHandler, TlsConnection};
use super::router;
use super::state::AppState;

/// HTTP application served over each authenticated connection.
pub struct Application {
    router: Router,
}

impl Application {
    /// Build the application with its route table and shared state.
    pub fn new(state: AppState) -> Self {
        Self {
            router: router::build(state),
        }
    }
}

#[async_trait]
impl ConnectionHandler for Application {
    async fn handle(&self, conn: TlsConnection, peer: SocketAddr) -> Result<()> {
        let service = TowerToHyperService::new(self.router.clone());
        ConnectionBuilder::new(TokioExecutor::new())
            .serve_connection_with_upgrades(TokioIo::new(conn), service)
            .await
            .map_err(|e| anyhow::anyhow!("HTTP connection from {peer} failed: {e}"))
    }
}
