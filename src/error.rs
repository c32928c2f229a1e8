/// Error types shared by the background, content and popup contexts
use thiserror::Error;

/// Failure of a classification or protection request.
///
/// The `Display` text is what the popup renders after `Error: `.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckError {
    #[error("No URL provided.")]
    EmptyUrl,

    #[error("Invalid API endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("{0}")]
    Network(String),

    #[error("Network response was not OK (status {0})")]
    Status(u16),

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

/// Failure reading or writing persisted settings
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Storage is not available in this context")]
    Unavailable,

    #[error("Storage call failed: {0}")]
    Bridge(String),

    #[error("Failed to (de)serialize settings: {0}")]
    Serde(String),
}
