//
//  skyhook-cli
//  auth/mod.rs
//

//! # Authentication Module
//!
//! Credentials for the Skyhook API, WSSE request signing, and persistent
//! credential storage.
//!
//! ## Module Structure
//!
//! - [`wsse`]: Per-request WSSE header generation
//! - [`store`]: Credential persistence in the platform config directory
//!
//! ## Example
//!
//! ```rust,no_run
//! use skyhook_cli::auth::{Credentials, CredentialStore};
//!
//! fn remember(creds: Credentials) -> anyhow::Result<()> {
//!     let store = CredentialStore::open()?;
//!     store.save(&creds)?;
//!     assert!(store.load()?.is_some());
//!     Ok(())
//! }
//! ```

mod store;
mod wsse;

pub use store::*;
pub use wsse::*;

use serde::{Deserialize, Serialize};

/// A username and its secret API key.
///
/// Immutable for the lifetime of the [`ApiClient`](crate::api::ApiClient)
/// constructed with it; the client never mutates or re-prompts for
/// credentials. The secret is only ever used as signing material; it is
/// never transmitted on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// The Skyhook account username.
    pub username: String,
    /// The secret API key obtained from the Skyhook dashboard.
    pub secret_key: String,
}

impl Credentials {
    /// Creates credentials from a username and secret key.
    ///
    /// No validation happens here; emptiness is rejected when a
    /// [`RequestSigner`] is constructed, before any network I/O.
    pub fn new(username: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret_key: secret_key.into(),
        }
    }
}
