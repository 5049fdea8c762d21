use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to extract '{file}': {reason}")]
    Extraction { file: String, reason: String },
}

/// Failures of the text-generation service. Never retried by callers.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("failed to reach generation service at {endpoint}: {reason}")]
    Unreachable { endpoint: String, reason: String },

    #[error("generation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generation service returned a non-JSON body: {0}")]
    InvalidBody(String),

    #[error("generation service returned an empty response; check the model name and server logs")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, Error>;
