//! Registry module for Docker registry interactions
//!
//! Authentication handshake and manifest existence check against the Docker
//! Registry HTTP API v2.

pub mod auth;
pub mod client;

pub use auth::{AuthChallenge, BearerToken};
pub use client::{RegistryClient, RegistryClientBuilder, TagExistence};
