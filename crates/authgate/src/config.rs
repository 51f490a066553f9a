//! Configuration loading and validation for the server.
//!
//! All values are read from environment variables at startup and resolved
//! into immutable structs with named, typed fields. The process exits with a
//! clear error message if any required variable is missing or invalid.

use std::net::{SocketAddr, ToSocketAddrs};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Display name logged at startup.
    #[serde(default = "default_server_name")]
    pub server_name: String,

    /// Host the listener binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port the listener binds to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Filesystem path to the PEM-encoded server certificate chain. **Required.**
    pub tls_cert_path: String,

    /// Filesystem path to the PEM-encoded server private key. **Required.**
    pub tls_key_path: String,

    /// Filesystem path to the PEM-encoded CA bundle used to verify client
    /// certificates. **Required.**
    pub ca_cert_path: String,

    /// Verbose logging.
    #[serde(default)]
    pub debug: bool,

    /// Test deployments also log verbosely.
    #[serde(default)]
    pub testing: bool,

    /// Explicit tracing level override (e.g. `"info"`, `"debug"`).
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_server_name() -> String {
    "authgate".into()
}
fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8443
}

/// Server certificate and private key paths.
///
/// Loaded once at startup and owned by the TLS context for the process
/// lifetime; the pair must match or context construction fails.
#[derive(Debug, Clone)]
pub struct ServerIdentity {
    /// Path to the PEM certificate chain presented to clients.
    pub cert_path: String,
    /// Path to the PEM private key for the leaf certificate.
    pub key_path: String,
}

/// CA bundle used to validate client-presented certificate chains.
#[derive(Debug, Clone)]
pub struct TrustAnchor {
    /// Path to the PEM CA certificate(s).
    pub ca_path: String,
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.server_name, "SERVER_NAME")?;
        ensure_non_empty(&self.host, "HOST")?;
        ensure_non_empty(&self.tls_cert_path, "TLS_CERT_PATH")?;
        ensure_non_empty(&self.tls_key_path, "TLS_KEY_PATH")?;
        ensure_non_empty(&self.ca_cert_path, "CA_CERT_PATH")?;

        if self.port == 0 {
            anyhow::bail!("PORT must be a non-zero TCP port");
        }
        Ok(())
    }

    /// Resolve the configured host and port into a bindable socket address.
    ///
    /// # Errors
    ///
    /// Returns an error if the host does not parse or resolve.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let target = format!("{}:{}", self.host, self.port);
        target
            .to_socket_addrs()
            .with_context(|| format!("invalid listen address '{target}'"))?
            .next()
            .ok_or_else(|| anyhow::anyhow!("listen address '{target}' resolved to no addresses"))
    }

    /// The server certificate/key pair presented to clients.
    pub fn server_identity(&self) -> ServerIdentity {
        ServerIdentity {
            cert_path: self.tls_cert_path.clone(),
            key_path: self.tls_key_path.clone(),
        }
    }

    /// The CA bundle client certificates must chain to.
    pub fn trust_anchor(&self) -> TrustAnchor {
        TrustAnchor {
            ca_path: self.ca_cert_path.clone(),
        }
    }

    /// Effective tracing level: an explicit `LOG_LEVEL` wins, otherwise
    /// `debug`/`testing` deployments log verbosely.
    pub fn log_level(&self) -> String {
        if let Some(level) = &self.log_level {
            return level.clone();
        }
        if self.debug || self.testing {
            "debug".into()
        } else {
            "info".into()
        }
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
