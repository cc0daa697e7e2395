//! Error types for catalog access

use thiserror::Error;

/// Failures surfaced by the catalog client, feeds and detail resolver
///
/// Nothing in the core retries; every failure goes back to the caller.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Transport failure (no connectivity, timeout, broken body)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status from the upstream API
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    Parse(String),

    /// A detail load was requested without a usable item id
    #[error("Missing item id")]
    MissingId,
}

impl CatalogError {
    pub fn is_network(&self) -> bool {
        matches!(self, CatalogError::Network(_))
    }

    /// HTTP status for upstream failures
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
