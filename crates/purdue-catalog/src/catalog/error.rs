//! Error types for catalog API access.

use thiserror::Error;

/// Errors that can occur while talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network/HTTP request failed
    #[error("network error: {message}")]
    Network { message: String },

    /// Server answered with a non-success status
    #[error("{resource} returned status {status}")]
    Status {
        status: reqwest::StatusCode,
        resource: &'static str,
    },

    /// Response body did not decode as the expected OData wrapper
    #[error("malformed response from {resource}: {message}")]
    Malformed {
        resource: &'static str,
        message: String,
    },

    /// Base URL in the configuration is not a valid URL
    #[error("invalid base URL: {message}")]
    Url { message: String },
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Network {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::Url {
            message: err.to_string(),
        }
    }
}
