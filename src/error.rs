//! Error handling module for the tag existence checker

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckError>;

/// Crate-wide error type; every fallible operation surfaces one of these.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Invalid arguments: {0}")]
    Argument(String),
    #[error("Invalid image reference: {0}")]
    Reference(String),
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Failed to parse auth challenge: {0}")]
    Challenge(String),
    #[error("Failed to get bearer token: {0}")]
    TokenFetch(String),
    #[error("Unexpected response: {0}")]
    UnexpectedStatus(StatusCode),
}
