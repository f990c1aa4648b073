//! Error types for authentication and catalog access.
//!
//! Persistence errors live in `shopfront_core::environment` next to the
//! storage trait; they never cross a slice boundary because every slice
//! degrades to defaults when storage fails.

use thiserror::Error;

/// Why a login attempt was rejected.
///
/// The display strings double as user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email or password was left blank.
    #[error("Please fill in all fields")]
    MissingFields,
    /// Credentials did not match any known account.
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Failures while fetching the product catalog.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build catalog client: {0}")]
    ClientBuild(String),
    /// The request did not complete.
    #[error("Catalog request failed: {0}")]
    RequestFailed(String),
    /// The request exceeded the configured timeout.
    #[error("Catalog request timed out")]
    Timeout,
    /// The server answered with a non-success status.
    #[error("Catalog API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// The response body was not a valid product list.
    #[error("Failed to parse catalog response: {0}")]
    ParseFailed(String),
}
