//! `authgate` — server binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured logging from explicit [`TelemetrySettings`].
//! 3. Run the database initialisation stub.
//! 4. Build the mutual-TLS server context.
//! 5. Bind the listener and run the accept loop with the HTTP application.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use authgate::config::Config;
use authgate::db::{DatabaseInitializer, NoopDatabase};
use authgate::server::app::Application;
use authgate::server::listener::start_listener;
use authgate::server::state::AppState;
use authgate::server::tls::build_tls_context;
use authgate::telemetry::{self, TelemetrySettings};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&TelemetrySettings::from_config(&cfg))?;

    // -----------------------------------------------------------------------
    // 3. Database (no-op until a backend is selected)
    // -----------------------------------------------------------------------
    NoopDatabase.initialize().await?;

    // -----------------------------------------------------------------------
    // 4. TLS context — certificate problems must surface before any socket
    //    is opened.
    // -----------------------------------------------------------------------
    let tls = build_tls_context(&cfg.server_identity(), &cfg.trust_anchor())?;

    // -----------------------------------------------------------------------
    // 5. Listener
    // -----------------------------------------------------------------------
    let addr = cfg.listen_addr()?;
    let listener = start_listener(addr).await?;
    info!(
        server = %cfg.server_name,
        version = env!("CARGO_PKG_VERSION"),
        addr = %listener.local_addr(),
        "starting server"
    );

    let app = Arc::new(Application::new(AppState::new(cfg.server_name.clone())));
    listener.serve(tls, app).await
}
