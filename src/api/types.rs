//
//  skyhook-cli
//  api/types.rs
//

//! Wire types for the Skyhook control API.
//!
//! Singular resource endpoints return flat objects; list endpoints wrap their
//! arrays under a `results` key, modeled by [`Results`].

use serde::{Deserialize, Serialize};

/// Detail object for one application (`GET api/v1/apps/{id}/`).
#[derive(Debug, Clone, Deserialize)]
pub struct AppDetail {
    /// Username of the application owner.
    pub owner: String,
    /// The git endpoint this application deploys from.
    pub remote: String,
}

/// One SSH public key as stored by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshKey {
    /// The human-readable label the key was added under.
    pub key_name: String,
    /// The public key material (`ssh-rsa AAAA…`).
    pub key: String,
}

/// Envelope for list endpoints (`{"results": [...]}`).
#[derive(Debug, Deserialize)]
pub(crate) struct Results<T> {
    pub results: Vec<T>,
}
