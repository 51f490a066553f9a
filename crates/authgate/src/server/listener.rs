//! TCP listener bind and the per-connection TLS accept loop.
//!
//! For each accepted TCP connection the listener:
//! 1. Performs the TLS server handshake, which verifies the client
//!    certificate against the configured CA.
//! 2. On success, hands the encrypted stream to the injected
//!    [`ConnectionHandler`] in its own Tokio task.
//! 3. On failure, logs and drops the connection.
//!
//! Handshake and handler failures never stop the accept loop or affect
//! other connections.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use rustls::ServerConfig;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::{debug, error, info, warn};

use super::handler::ConnectionHandler;
use crate::error::ListenerError;

/// A bound, not-yet-serving listener socket.
pub struct Listener {
    inner: TcpListener,
    addr: SocketAddr,
}

/// Bind the listener socket.
///
/// Binding happens before any connection is accepted; a failure here is
/// fatal to startup.
///
/// # Errors
///
/// Returns [`ListenerError::Bind`] if the address is already in use, the
/// process lacks permission, or the host is invalid.
pub async fn start_listener(addr: SocketAddr) -> Result<Listener, ListenerError> {
    let inner = TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })?;
    let addr = inner
        .local_addr()
        .map_err(|source| ListenerError::Bind { addr, source })?;
    Ok(Listener { inner, addr })
}

impl Listener {
    /// The locally bound address (useful when binding port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Accept loop: handshake and dispatch each connection independently.
    ///
    /// The TLS context is shared read-only across all connection tasks.
    /// Runs until the process is killed.
    pub async fn serve(
        self,
        tls: Arc<ServerConfig>,
        handler: Arc<dyn ConnectionHandler>,
    ) -> Result<()> {
        let acceptor = TlsAcceptor::from(tls);
        info!(addr = %self.addr, "listening");

        loop {
            match self.inner.accept().await {
                Ok((tcp, peer)) => {
                    let acceptor = acceptor.clone();
                    let handler = Arc::clone(&handler);
                    tokio::spawn(async move {
                        // The handshake verifies the client certificate; a
                        // rejected peer never reaches the handler.
                        match acceptor.accept(tcp).await {
                            Ok(conn) => {
                                debug!(%peer, "client authenticated");
                                if let Err(e) = handler.handle(conn, peer).await {
                                    warn!(%peer, error = %e, "connection handler error");
                                }
                            }
                            Err(e) => {
                                warn!(%peer, error = %e, "TLS handshake rejected");
                            }
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "accept error");
                }
            }
        }
    }
}
