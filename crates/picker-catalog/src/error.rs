//! Catalog transport error types.

use thiserror::Error;

/// Errors that can occur when querying the catalog service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Failed to send the request or read the response.
    #[error("Request failed: {0}")]
    Request(String),

    /// Non-2xx response.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// Response could not be decoded at all.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Client is misconfigured.
    #[error("Invalid catalog configuration: {0}")]
    Config(String),
}

impl CatalogError {
    /// Short user-facing message.
    pub fn user_message(&self) -> &'static str {
        match self {
            CatalogError::Timeout => "The catalog took too long to respond",
            CatalogError::Http { status: 401 | 403, .. } => "The catalog rejected our credentials",
            CatalogError::Config(_) => "The catalog is not configured",
            _ => "Error fetching products",
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e.to_string())
    }
}
