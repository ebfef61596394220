use thiserror::Error;

/// Errors that can occur when talking to the category backend.
///
/// A body that fails to parse as a category list is deliberately NOT an
/// error: list responses degrade to an empty collection at the ingestion
/// boundary so a misbehaving backend never breaks the screen.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(reqwest::Error),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// HTTP response with a non-success status code. `message` carries the
    /// server-provided human-readable message when the body had one.
    #[error("HTTP error: status {status}")]
    Status { status: u16, message: Option<String> },
}

impl ApiError {
    /// Classify a transport error, separating timeouts from other failures.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }

    /// The string shown to the user in the status line: the server-provided
    /// message when one exists, otherwise a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(msg), ..
            } => msg.clone(),
            Self::Status { status, .. } => format!("Server error (HTTP {})", status),
            Self::Timeout => "Request timed out".to_string(),
            Self::Network(_) => "Could not reach the server".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_used_verbatim() {
        let err = ApiError::Status {
            status: 409,
            message: Some("Category is still referenced by 3 products".to_string()),
        };
        assert_eq!(
            err.user_message(),
            "Category is still referenced by 3 products"
        );
    }

    #[test]
    fn test_status_without_message_falls_back() {
        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), "Server error (HTTP 500)");
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(ApiError::Timeout.user_message(), "Request timed out");
    }
}
