use thiserror::Error;

/// Errors returned by every provider-facing operation
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Network, IO or payload decoding failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider answered with a non-success status
    #[error("HTTP {code}: {message}")]
    Http { code: u16, message: String },

    /// Provider answered successfully but without a usable payload
    #[error("Provider returned an empty result")]
    EmptyResult,
}

impl ProviderError {
    /// Status code to log alongside the message.
    ///
    /// Failures that never produced a response report 500, empty payloads
    /// report 404.
    pub fn status_code(&self) -> u16 {
        match self {
            ProviderError::Transport(_) => 500,
            ProviderError::Http { code, .. } => *code,
            ProviderError::EmptyResult => 404,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Transport(format!("Malformed provider payload: {}", err))
    }
}

/// Errors raised by the document store and the recipe book on top of it
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document at the requested key
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Document rejected before it was written
    #[error("Invalid document: {0}")]
    Invalid(String),

    /// Document could not be converted to or from JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend specific failure
    #[error("Store backend error: {0}")]
    Backend(String),
}
