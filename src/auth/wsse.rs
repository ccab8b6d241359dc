//
//  skyhook-cli
//  auth/wsse.rs
//

//! # WSSE Request Signing
//!
//! The Skyhook API authenticates each request with a WSSE-style `X-WSSE`
//! header instead of sending the secret key on the wire. The header carries
//! the username, a fresh nonce, an RFC 3339 timestamp, and a password digest:
//!
//! ```text
//! X-WSSE: UsernameToken Username="alice", PasswordDigest="…",
//!         Nonce="…", Created="2026-08-30T12:00:00.000000Z"
//! ```
//!
//! The digest is the Base64-encoded SHA-256 of
//! `method + path + nonce + created + secret_key`, binding the signature to
//! the specific request. The nonce and timestamp MUST vary per call so that a
//! captured header cannot be replayed against a compliant server; signing two
//! identical requests therefore never yields equal header values.
//!
//! Signing performs no I/O and cannot fail once a signer has been
//! constructed: the only failure mode is malformed credentials (empty
//! username or key), rejected locally at construction time.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{SecondsFormat, Utc};
use rand::distr::{Alphanumeric, SampleString};
use sha2::{Digest, Sha256};

use super::Credentials;
use crate::api::ApiError;

/// Number of random alphanumeric characters in each nonce.
const NONCE_LEN: usize = 16;

/// Signs API requests on behalf of one set of credentials.
///
/// A signer is constructed once per [`ApiClient`](crate::api::ApiClient) and
/// borrowed for every request. Construction validates the credentials;
/// [`header_value`](Self::header_value) itself never fails.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    /// Creates a signer for the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidCredentials`] if the username or secret key
    /// is empty. This is a local, non-network error, fatal to the call.
    pub fn new(credentials: Credentials) -> Result<Self, ApiError> {
        if credentials.username.is_empty() {
            return Err(ApiError::InvalidCredentials("username must not be empty"));
        }
        if credentials.secret_key.is_empty() {
            return Err(ApiError::InvalidCredentials("secret key must not be empty"));
        }
        Ok(Self { credentials })
    }

    /// The username these requests are signed as.
    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    /// Produces the `X-WSSE` header value for one request.
    ///
    /// Deterministic for fixed inputs except for the nonce and timestamp,
    /// which are freshly generated on every call for replay resistance.
    ///
    /// # Parameters
    ///
    /// * `method` - The HTTP method, e.g. `"GET"` or `"POST"`
    /// * `path` - The relative request path, e.g. `"api/v1/apps/"`
    pub fn header_value(&self, method: &str, path: &str) -> String {
        let nonce = Alphanumeric.sample_string(&mut rand::rng(), NONCE_LEN);
        let created = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let digest = self.digest(method, path, &nonce, &created);
        format!(
            "UsernameToken Username=\"{}\", PasswordDigest=\"{}\", Nonce=\"{}\", Created=\"{}\"",
            self.credentials.username, digest, nonce, created
        )
    }

    /// Computes the Base64 SHA-256 password digest over
    /// method + path + nonce + created + secret.
    fn digest(&self, method: &str, path: &str, nonce: &str, created: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(method.as_bytes());
        hasher.update(path.as_bytes());
        hasher.update(nonce.as_bytes());
        hasher.update(created.as_bytes());
        hasher.update(self.credentials.secret_key.as_bytes());
        BASE64.encode(hasher.finalize())
    }
}

/// The header name the signed value is sent under.
pub const WSSE_HEADER: &str = "X-WSSE";

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn signer() -> RequestSigner {
        RequestSigner::new(Credentials::new("alice", "topsecret")).unwrap()
    }

    #[test]
    fn empty_username_is_rejected_locally() {
        let err = RequestSigner::new(Credentials::new("", "key")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials(_)));
    }

    #[test]
    fn empty_key_is_rejected_locally() {
        let err = RequestSigner::new(Credentials::new("alice", "")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials(_)));
    }

    #[test]
    fn header_carries_username_nonce_and_timestamp() {
        let value = signer().header_value("GET", "api/v1/apps/");
        assert!(value.starts_with("UsernameToken Username=\"alice\""));
        assert!(value.contains("PasswordDigest=\""));
        assert!(value.contains("Nonce=\""));
        assert!(value.contains("Created=\""));
        // The raw secret never appears on the wire.
        assert!(!value.contains("topsecret"));
    }

    #[test]
    fn repeated_signatures_never_collide() {
        // Replay resistance: no two generated headers may ever be equal, even
        // for identical method/path/credentials.
        let signer = signer();
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let value = signer.header_value("GET", "api/v1/apps/");
            assert!(seen.insert(value), "duplicate signature generated");
        }
    }

    #[test]
    fn digest_binds_method_and_path() {
        let signer = signer();
        let a = signer.digest("GET", "api/v1/apps/", "nonce", "created");
        let b = signer.digest("POST", "api/v1/apps/", "nonce", "created");
        let c = signer.digest("GET", "api/v1/keys/", "nonce", "created");
        assert_ne!(a, b);
        assert_ne!(a, c);
        // Deterministic once nonce and timestamp are fixed.
        assert_eq!(a, signer.digest("GET", "api/v1/apps/", "nonce", "created"));
    }
}
