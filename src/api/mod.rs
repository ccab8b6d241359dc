//
//  skyhook-cli
//  api/mod.rs
//

//! # Skyhook Control API
//!
//! The authenticated client layer: [`ApiClient`] exposes one typed method per
//! server operation, [`ApiError`] is the closed failure taxonomy, and the
//! wire types live in [`types`].

mod client;
mod error;
pub mod types;

pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use error::ApiError;
