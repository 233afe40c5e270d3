/// Error types for the inclinometer core library
use thiserror::Error;

/// Main error type for sensor document operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Failed to read the sensor document
    #[error("Failed to read sensor document: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON content
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document root is not a JSON object keyed by timestamp
    #[error("Invalid sensor document: {0}")]
    InvalidDocument(String),

    /// A campaign key is not an ISO-8601 timestamp
    #[error("Invalid campaign timestamp {key:?}: {message}")]
    Timestamp { key: String, message: String },

    /// Campaign not present in the document
    #[error("Campaign not found: {0}")]
    CampaignNotFound(String),

    /// No campaign can serve as the baseline
    #[error("No reference campaign available")]
    NoReference,
}

/// Type alias for Results using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;
