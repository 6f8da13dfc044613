//! Stock footage errors.

use clipdeck_common::error::ClipdeckError;

/// Failures while querying a stock provider.
///
/// These never reach the user as faults; the catalog records them and
/// falls back to its static sample set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StockError {
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    #[error("Stock provider returned status {code}")]
    Status { code: u16 },

    #[error("Failed to decode stock response: {message}")]
    Decode { message: String },

    #[error("No API key found in ${var}")]
    MissingApiKey { var: String },

    #[error("Stock search task failed: {message}")]
    Task { message: String },
}

pub type StockResult<T> = Result<T, StockError>;

impl From<ureq::Error> for StockError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::Status { code },
            other => Self::Http {
                message: other.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for StockError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

impl From<StockError> for ClipdeckError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::MissingApiKey { .. } => ClipdeckError::config(err.to_string()),
            other => ClipdeckError::network(other.to_string()),
        }
    }
}
