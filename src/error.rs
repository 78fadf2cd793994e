use thiserror::Error;

use crate::types::ItemId;

/// Failures of the data source or of form validation.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Connectivity failure or an undecodable response body.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Any non-success HTTP status; codes are not distinguished further.
    #[error("server answered with status {0}")]
    Status(u16),

    #[error("storage access failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("stored menu is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("no menu item with id {0}")]
    NotFound(ItemId),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required.")]
    MissingName,
    #[error("Price is required.")]
    MissingPrice,
    #[error("Price must be a valid number.")]
    InvalidPrice,
    #[error("Price cannot be negative.")]
    NegativePrice,
}
