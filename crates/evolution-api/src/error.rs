//! Gateway error types

use thiserror::Error;

/// Result type for gateway operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while talking to the Evolution API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The gateway answered with a non-success status
    ///
    /// Carries the raw response body so the caller sees exactly what the
    /// gateway reported.
    #[error("Evolution API error: {status} {status_text}\n{body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The request could not be sent or the response could not be read
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A success response whose body is not JSON
    #[error("Invalid response body: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// The api key cannot be sent as an HTTP header
    #[error("API key is not a valid header value")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),

    /// The endpoint URL could not be built from the base URL
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Build a status error from its parts
    pub fn status(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidUrl(message.into())
    }

    /// HTTP status code, if the gateway answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = ApiError::status(500, "Internal Server Error", "oops");
        assert_eq!(
            err.to_string(),
            "Evolution API error: 500 Internal Server Error\noops"
        );
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn test_status_error_keeps_raw_body() {
        let body = r#"{"status":404,"error":"Not Found","response":{"message":["The \"main\" instance does not exist"]}}"#;
        let err = ApiError::status(404, "Not Found", body);
        assert!(err.to_string().ends_with(body));
    }

    #[test]
    fn test_invalid_response_has_no_status() {
        let parse_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = ApiError::from(parse_err);
        assert!(err.to_string().starts_with("Invalid response body:"));
        assert_eq!(err.status_code(), None);
    }
}
