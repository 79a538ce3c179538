use thiserror::Error;

/// Maximum number of error body characters kept in `ApiError::Http`.
pub const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status of the failed exchange, if the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Builds an `Http` error from a status and a raw response body.
    #[must_use]
    pub fn http(status: u16, body: &str) -> Self {
        ApiError::Http {
            status,
            message: sanitize_body(body),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout("Request timed out. Please try again.".to_string())
        } else if err.is_builder() {
            ApiError::Serialization(format!("Failed to build request: {err}"))
        } else if err.is_decode() {
            ApiError::Parse(format!("Failed to decode response: {err}"))
        } else {
            ApiError::Network(format!("Unable to reach the server: {err}"))
        }
    }
}

/// Trims and truncates an error body so it can be shown or logged safely.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
