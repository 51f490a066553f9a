//! Mutual-TLS server context construction.
//!
//! Loads the server identity (certificate chain + private key) and the CA
//! bundle, then builds a [`rustls::ServerConfig`] whose client verifier
//! rejects any handshake without a valid certificate chaining to the CA.
//! There is no unauthenticated mode: a context either enforces client
//! verification or fails to build.

use std::sync::Arc;

use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::server::WebPkiClientVerifier;
use rustls::{RootCertStore, ServerConfig};
use tracing::debug;

use crate::config::{ServerIdentity, TrustAnchor};
use crate::error::TlsError;

/// Build the server-side TLS context.
///
/// All certificate material is read once; the returned context is immutable
/// and safely shared across every connection task.
///
/// # Errors
///
/// - [`TlsError::CertificateLoad`] — the server certificate or key file is
///   missing, unreadable, or contains no usable PEM material.
/// - [`TlsError::TrustAnchor`] — the CA bundle cannot be read or is rejected
///   by the trust store.
/// - [`TlsError::KeyMismatch`] — the private key does not match the server
///   certificate.
pub fn build_tls_context(
    identity: &ServerIdentity,
    trust: &TrustAnchor,
) -> Result<Arc<ServerConfig>, TlsError> {
    let server_certs = load_certs(&identity.cert_path)?;
    let server_key = load_private_key(&identity.key_path)?;
    let ca_certs = load_certs(&trust.ca_path).map_err(|e| match e {
        TlsError::CertificateLoad { path, reason } => TlsError::TrustAnchor { path, reason },
        other => other,
    })?;

    let mut roots = RootCertStore::empty();
    for cert in ca_certs {
        roots.add(cert).map_err(|e| TlsError::TrustAnchor {
            path: trust.ca_path.clone(),
            reason: e.to_string(),
        })?;
    }

    // Client certificates are always required; there is no unauthenticated mode.
    let verifier = WebPkiClientVerifier::builder(Arc::new(roots))
        .build()
        .map_err(|e| TlsError::TrustAnchor {
            path: trust.ca_path.clone(),
            reason: e.to_string(),
        })?;

    let mut config = ServerConfig::builder()
        .with_client_cert_verifier(verifier)
        .with_single_cert(server_certs, server_key)
        .map_err(|source| TlsError::KeyMismatch { source })?;

    // Prefer HTTP/2, fall back to HTTP/1.1.
    config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    debug!(cert = %identity.cert_path, ca = %trust.ca_path, "mutual-TLS server context built");
    Ok(Arc::new(config))
}

/// Load all certificates from a PEM file.
fn load_certs(path: &str) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let pem = read_file(path)?;
    let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut pem.as_slice())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| TlsError::CertificateLoad {
            path: path.into(),
            reason: e.to_string(),
        })?;

    if certs.is_empty() {
        return Err(TlsError::CertificateLoad {
            path: path.into(),
            reason: "no certificates found".into(),
        });
    }
    Ok(certs)
}

/// Load the first private key from a PEM file.
///
/// Supports RSA, PKCS#8, and SEC1 EC keys.
fn load_private_key(path: &str) -> Result<PrivateKeyDer<'static>, TlsError> {
    let pem = read_file(path)?;
    rustls_pemfile::private_key(&mut pem.as_slice())
        .map_err(|e| TlsError::CertificateLoad {
            path: path.into(),
            reason: e.to_string(),
        })?
        .ok_or_else(|| TlsError::CertificateLoad {
            path: path.into(),
            reason: "no private key found".into(),
        })
}

fn read_file(path: &str) -> Result<Vec<u8>, TlsError> {
    std::fs::read(path).map_err(|e| TlsError::CertificateLoad {
        path: path.into(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, KeyPair};
    use std::fs;
    use std::path::Path;

    fn new_ca() -> (rcgen::Certificate, KeyPair) {
        let key = KeyPair::generate().unwrap();
        let mut params = CertificateParams::default();
        params
            .distinguished_name
            .push(DnType::CommonName, "test root ca");
        params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
        let cert = params.self_signed(&key).unwrap();
        (cert, key)
    }

    fn new_server_leaf(ca: &rcgen::Certificate, ca_key: &KeyPair) -> (rcgen::Certificate, KeyPair) {
        let key = KeyPair::generate().unwrap();
        let mut params = CertificateParams::new(vec!["localhost".to_string()]).unwrap();
        params
            .distinguished_name
            .push(DnType::CommonName, "test server");
        let cert = params.signed_by(&key, ca, ca_key).unwrap();
        (cert, key)
    }

    /// Write a full CA + server identity to `dir` and return the paths.
    fn write_material(dir: &Path) -> (ServerIdentity, TrustAnchor) {
        let (ca_cert, ca_key) = new_ca();
        let (server_cert, server_key) = new_server_leaf(&ca_cert, &ca_key);

        let cert_path = dir.join("server.pem");
        let key_path = dir.join("server.key");
        let ca_path = dir.join("ca.pem");
        fs::write(&cert_path, server_cert.pem()).unwrap();
        fs::write(&key_path, server_key.serialize_pem()).unwrap();
        fs::write(&ca_path, ca_cert.pem()).unwrap();

        (
            ServerIdentity {
                cert_path: cert_path.to_str().unwrap().into(),
                key_path: key_path.to_str().unwrap().into(),
            },
            TrustAnchor {
                ca_path: ca_path.to_str().unwrap().into(),
            },
        )
    }

    #[test]
    fn builds_context_from_valid_material() {
        let dir = tempfile::tempdir().unwrap();
        let (identity, trust) = write_material(dir.path());
        let config = build_tls_context(&identity, &trust).unwrap();
        assert_eq!(config.alpn_protocols, vec![b"h2".to_vec(), b"http/1.1".to_vec()]);
    }

    #[test]
    fn context_build_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let (identity, trust) = write_material(dir.path());
        assert!(build_tls_context(&identity, &trust).is_ok());
        assert!(build_tls_context(&identity, &trust).is_ok());
    }

    #[test]
    fn rejects_missing_cert_file() {
        let dir = tempfile::tempdir().unwrap();
        let (mut identity, trust) = write_material(dir.path());
        identity.cert_path = "/nonexistent/server.pem".into();

        let err = build_tls_context(&identity, &trust).unwrap_err();
        assert!(matches!(err, TlsError::CertificateLoad { .. }));
        assert!(err.to_string().contains("/nonexistent/server.pem"));
    }

    #[test]
    fn rejects_garbage_cert_pem() {
        let dir = tempfile::tempdir().unwrap();
        let (mut identity, trust) = write_material(dir.path());
        let garbage = dir.path().join("garbage.pem");
        fs::write(&garbage, b"not a pem").unwrap();
        identity.cert_path = garbage.to_str().unwrap().into();

        let err = build_tls_context(&identity, &trust).unwrap_err();
        assert!(matches!(err, TlsError::CertificateLoad { .. }));
    }

    #[test]
    fn rejects_key_only_file_as_cert() {
        let dir = tempfile::tempdir().unwrap();
        let (identity, trust) = write_material(dir.path());
        let swapped = ServerIdentity {
            cert_path: identity.key_path.clone(),
            key_path: identity.key_path.clone(),
        };

        let err = build_tls_context(&swapped, &trust).unwrap_err();
        assert!(matches!(err, TlsError::CertificateLoad { .. }));
    }

    #[test]
    fn rejects_mismatched_key() {
        let dir = tempfile::tempdir().unwrap();
        let (identity, trust) = write_material(dir.path());

        // A second, unrelated leaf key under the same CA.
        let (ca_cert, ca_key) = new_ca();
        let (_, other_key) = new_server_leaf(&ca_cert, &ca_key);
        let other_key_path = dir.path().join("other.key");
        fs::write(&other_key_path, other_key.serialize_pem()).unwrap();

        let mismatched = ServerIdentity {
            cert_path: identity.cert_path.clone(),
            key_path: other_key_path.to_str().unwrap().into(),
        };
        let err = build_tls_context(&mismatched, &trust).unwrap_err();
        assert!(matches!(err, TlsError::KeyMismatch { .. }));
    }

    #[test]
    fn rejects_empty_ca_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let (identity, mut trust) = write_material(dir.path());
        let empty = dir.path().join("empty-ca.pem");
        fs::write(&empty, b"").unwrap();
        trust.ca_path = empty.to_str().unwrap().into();

        let err = build_tls_context(&identity, &trust).unwrap_err();
        assert!(matches!(err, TlsError::TrustAnchor { .. }));
    }
}
