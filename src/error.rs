use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfirmationError>;

#[derive(Error, Debug)]
pub enum ConfirmationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status code: {0}")]
    BadStatus(u16),
    #[error("Malformed status response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}
