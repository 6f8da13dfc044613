//! Error types shared across Clipdeck crates.

/// Top-level error type for Clipdeck editing sessions.
///
/// Every variant is recoverable: a failed operation leaves the session in
/// the last valid state it had before the call.
#[derive(Debug, thiserror::Error)]
pub enum ClipdeckError {
    /// Bad user input (empty overlay text, wrong file type or size).
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The operation targeted a time or id with no match.
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The media collaborator failed to fetch or decode a source.
    #[error("Source load error: {message}")]
    SourceLoad { message: String },

    /// Stock footage fetch failed.
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Deferred features (export, trim).
    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ClipdeckError.
pub type ClipdeckResult<T> = Result<T, ClipdeckError>;

impl ClipdeckError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound {
            message: msg.into(),
        }
    }

    pub fn source_load(msg: impl Into<String>) -> Self {
        Self::SourceLoad {
            message: msg.into(),
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    /// Message suitable for presenting to the user as-is.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::NotFound { message }
            | Self::SourceLoad { message }
            | Self::Network { message }
            | Self::Config { message }
            | Self::Unsupported { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        let err = ClipdeckError::not_found("No scene to split at current position");
        assert_eq!(
            err.to_string(),
            "Not found: No scene to split at current position"
        );
    }

    #[test]
    fn test_user_message_strips_category() {
        let err = ClipdeckError::validation("Please select a valid video file");
        assert_eq!(err.user_message(), "Please select a valid video file");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: ClipdeckError = parse.unwrap_err().into();
        assert!(matches!(err, ClipdeckError::Json(_)));
    }
}
