//! Shared application state injected into every Axum handler.

use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// Cheaply cloneable so that Axum can clone it per request.
#[derive(Clone)]
pub struct AppState {
    /// Configured server display name.
    pub server_name: Arc<String>,
}

impl AppState {
    /// Create a new [`AppState`] with the provided server name.
    pub fn new(server_name: String) -> Self {
        Self {
            server_name: Arc::new(server_name),
        }
    }
}

impl Default for AppState {
    /// Creates a default [`AppState`], suitable for tests.
    fn default() -> Self {
        Self::new("authgate".into())
    }
}
