//
//  skyhook-cli
//  api/error.rs
//

//! # API Error Taxonomy
//!
//! Every failure the [`ApiClient`](super::ApiClient) can produce is one of the
//! four variants of [`ApiError`]. The taxonomy is closed and classification is
//! deterministic, applied to every response before the caller ever sees the
//! body:
//!
//! | condition | variant |
//! |---|---|
//! | network-level failure (refused, timeout, DNS) | [`ApiError::Transport`] |
//! | HTTP 401 | [`ApiError::Unauthorized`] |
//! | HTTP 2xx | success, body handed to the caller |
//! | any other status, or a 2xx body that fails to decode | [`ApiError::Client`] |
//! | empty username or key, detected before any network I/O | [`ApiError::InvalidCredentials`] |
//!
//! `Unauthorized` is semantically a subtype of `Client` ("authentication
//! specifically failed"): callers that only care about generic API failure can
//! use [`ApiError::is_client_error`], while login flows match the variant
//! directly. No variant is ever retried internally; every mutating request is
//! non-idempotent server-side, so a retry could double-apply it.

use thiserror::Error;

/// Typed error for all Skyhook API client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response: connection refused,
    /// timeout, DNS failure. Retryable by the caller, never retried here.
    #[error("could not reach the Skyhook server: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server rejected the credentials (HTTP 401), regardless of body
    /// content. Never retried; surfaced so the user can re-authenticate.
    #[error("authentication failed (status {status}): run 'sky login' to re-authenticate")]
    Unauthorized {
        /// The HTTP status code. Always 401 when produced by classification.
        status: u16,
        /// The raw response body, kept verbatim for debugging.
        body: String,
    },

    /// Any other non-2xx response, or a 2xx response whose body violated the
    /// API contract. Carries the exact status and raw body verbatim.
    #[error("server returned status {status}:\n{body}")]
    Client {
        /// The HTTP status code as received.
        status: u16,
        /// The raw response body, or a decoding-failure note for contract
        /// violations on 2xx responses.
        body: String,
    },

    /// Local credential validation failed before any network I/O was
    /// attempted. Fatal to the call.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(&'static str),
}

impl ApiError {
    /// Documented "is-a" predicate: whether this error represents a response
    /// the server produced and rejected.
    ///
    /// [`ApiError::Unauthorized`] is a strict subtype of the client-error
    /// kind, so this returns `true` for both it and [`ApiError::Client`].
    /// Transport and local-validation failures are not client errors.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::Client { .. })
    }

    /// Whether this error specifically means the credentials were rejected
    /// or are locally unusable.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. } | Self::InvalidCredentials(_)
        )
    }

    /// The HTTP status code carried by this error, if a response was
    /// received at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::Client { status, .. } => Some(*status),
            Self::Transport(_) | Self::InvalidCredentials(_) => None,
        }
    }
}

/// Classifies a received response into the error taxonomy.
///
/// Applied immediately after every response is read, before the caller
/// touches the body. 401 always takes precedence; the 2xx range succeeds and
/// hands the raw body back; everything else becomes [`ApiError::Client`]
/// carrying the exact status code and body.
pub fn classify(status: u16, body: String) -> Result<String, ApiError> {
    if status == 401 {
        return Err(ApiError::Unauthorized { status, body });
    }
    if (200..300).contains(&status) {
        return Ok(body);
    }
    Err(ApiError::Client { status, body })
}
