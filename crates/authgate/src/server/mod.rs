//! Mutual-TLS listener and the default HTTP application.
//!
//! # Responsibilities
//! - Build the server-side TLS context requiring client certificates (rustls).
//! - Bind the TCP listener and run the per-connection accept loop.
//! - Hand each authenticated connection to the injected [`handler::ConnectionHandler`].

pub mod app;
pub mod handler;
pub mod handlers;
pub mod listener;
pub mod middleware;
pub mod protocol;
pub mod router;
pub mod state;
pub mod tls;
