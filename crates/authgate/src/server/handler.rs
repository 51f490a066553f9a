//! The connection-handling capability injected into the listener.

use std::net::SocketAddr;

use anyhow::Result;
use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio_rustls::server::TlsStream;

/// An accepted, client-authenticated TLS connection.
pub type TlsConnection = TlsStream<TcpStream>;

/// Capability invoked once per accepted, authenticated connection.
///
/// The listener imposes nothing on the handler beyond "receives bytes, may
/// write bytes back". Handlers only ever observe peers whose certificate
/// chain was verified during the handshake.
#[async_trait]
pub trait ConnectionHandler: Send + Sync + 'static {
    /// Handle one connection to completion.
    ///
    /// Errors are logged by the listener and isolated to this connection.
    async fn handle(&self, conn: TlsConnection, peer: SocketAddr) -> Result<()>;
}
