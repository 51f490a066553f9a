//! Typed errors for the TLS bootstrap seams.

use std::net::SocketAddr;

use thiserror::Error;

/// Errors raised while constructing the mutual-TLS server context.
///
/// All variants are startup-fatal: the listener must never bind with a
/// broken or partially-loaded TLS context.
#[derive(Debug, Error)]
pub enum TlsError {
    /// A certificate or key file is missing, unreadable, or malformed.
    #[error("cannot load certificate material from '{path}': {reason}")]
    CertificateLoad { path: String, reason: String },

    /// The CA bundle could not populate the client trust store.
    #[error("CA trust anchor '{path}' is invalid: {reason}")]
    TrustAnchor { path: String, reason: String },

    /// The server certificate and private key do not form a matching pair.
    #[error("server certificate and private key do not match")]
    KeyMismatch {
        #[source]
        source: rustls::Error,
    },
}

/// Errors raised while binding the listener socket.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The listen address could not be bound (in use, denied, or invalid).
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}
