//! Vision client error types.

use thiserror::Error;

/// Result type for vision client operations.
pub type VisionResult<T> = Result<T, VisionError>;

/// Errors that can occur while recognizing objects.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Inference service returned {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl VisionError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// HTTP status reported by the inference service, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            VisionError::UpstreamError { status, .. } => Some(*status),
            VisionError::TransportError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            VisionError::InvalidInput(_) => "invalid_input",
            VisionError::ConfigError(_) => "config",
            VisionError::TransportError(_) => "transport",
            VisionError::UpstreamError { .. } => "upstream",
            VisionError::ParseError(_) => "parse",
        }
    }
}

impl From<serde_json::Error> for VisionError {
    fn from(e: serde_json::Error) -> Self {
        Self::ParseError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status() {
        let err = VisionError::UpstreamError {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.http_status(), Some(500));
        assert_eq!(err.kind(), "upstream");
        assert_eq!(err.to_string(), "Inference service returned 500: boom");
    }

    #[test]
    fn test_non_http_errors_have_no_status() {
        assert_eq!(VisionError::invalid_input("x").http_status(), None);
        assert_eq!(VisionError::config_error("x").http_status(), None);
        assert_eq!(VisionError::parse_error("x").http_status(), None);
    }

    #[test]
    fn test_json_error_maps_to_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: VisionError = json_err.into();
        assert!(matches!(err, VisionError::ParseError(_)));
        assert_eq!(err.kind(), "parse");
    }
}
