use thiserror::Error;

#[derive(Debug, Error)]
pub enum DistanceMatrixError {
    #[error("invalid argument: origin is empty")]
    InvalidOrigin,

    #[error("invalid argument: destination is empty")]
    InvalidDestination,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("service status error: {status}: {message}")]
    ServiceStatus { status: String, message: String },

    #[error("result status error: {0}")]
    ElementStatus(String),

    #[error("Incomplete response")]
    IncompleteResponse,
}
