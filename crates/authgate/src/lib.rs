//! `authgate` — mutually-authenticated HTTPS application server.
//!
//! The core contract is the TLS listener bootstrap: load a server identity
//! and a CA trust anchor, build a server-side TLS context that **requires**
//! a valid client certificate, bind a TCP listener, and hand each
//! authenticated connection to a pluggable [`server::handler::ConnectionHandler`].
//!
//! A connection that fails client-certificate verification is closed during
//! the handshake; no handler ever observes an unauthenticated peer.

pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod telemetry;
