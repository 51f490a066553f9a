//! Database initialisation boundary.
//!
//! The persistence layer is not part of this build; the boundary stays
//! visible as a capability invoked once at startup. A failing implementation
//! aborts startup with the same policy as a certificate error.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

/// Capability invoked once at startup to prepare the persistence layer.
#[async_trait]
pub trait DatabaseInitializer: Send + Sync {
    /// Prepare the database for use.
    ///
    /// # Errors
    ///
    /// Any error returned here is fatal to startup.
    async fn initialize(&self) -> Result<()>;
}

/// Placeholder initializer for builds without a persistence backend.
// TODO: replace with a real schema bootstrap once a database backend lands.
pub struct NoopDatabase;

#[async_trait]
impl DatabaseInitializer for NoopDatabase {
    async fn initialize(&self) -> Result<()> {
        debug!("database initialisation skipped (no backend configured)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_initializer_never_fails() {
        assert!(NoopDatabase.initialize().await.is_ok());
    }
}
