// src/error.rs
use thiserror::Error;

/// Everything that can go wrong between a submitted keyword and rendered items.
///
/// None of these are fatal: the caller shows the message and goes back to an
/// empty result list.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("backend error: {0}")]
    BackendError(String),

    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl SearchError {
    /// Short heading used for the notification item.
    pub fn title(&self) -> &'static str {
        match self {
            SearchError::InvalidInput(_) => "Invalid input",
            SearchError::BackendError(_) => "Backend error",
            SearchError::NetworkFailure(_) => "Network failure",
            SearchError::Io(_) | SearchError::Json(_) | SearchError::Csv(_) => "Local storage error",
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SearchError::BackendError(format!("malformed response: {}", err))
        } else if let Some(status) = err.status() {
            SearchError::BackendError(format!("HTTP {}", status))
        } else {
            SearchError::NetworkFailure(err.to_string())
        }
    }
}
