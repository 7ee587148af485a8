use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Not authorized by the backend")]
    Unauthorized,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Maps a non-success backend status and its body onto an error.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        let message = backend_message(&body);
        match status {
            StatusCode::NOT_FOUND => RepositoryError::NotFound,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RepositoryError::Unauthorized,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                RepositoryError::ValidationError(message)
            }
            _ => RepositoryError::Backend {
                status: status.as_u16(),
                message,
            },
        }
    }
}

/// Extracts `message` (or `error`) from a JSON error body, falling back to
/// the raw text.
fn backend_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .into_iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else if err.is_connect() || err.is_timeout() || err.is_request() {
            RepositoryError::ConnectionError(err.to_string())
        } else if let Some(status) = err.status() {
            RepositoryError::from_status(status, err.to_string())
        } else {
            RepositoryError::Unexpected(format!("Unexpected HTTP client error: {err}"))
        }
    }
}
