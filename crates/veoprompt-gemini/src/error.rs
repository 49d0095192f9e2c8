//! Gemini client error types.

use thiserror::Error;
use veoprompt_models::ValidationError;

pub type GeminiResult<T> = Result<T, GeminiError>;

#[derive(Debug, Error)]
pub enum GeminiError {
    /// Credential or client setup failure. Fatal at startup.
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// The unstructured input was empty; rejected before any I/O.
    #[error("input text must not be empty")]
    EmptyInput,

    /// The service answered with a non-success status.
    #[error("service error: {0}")]
    Service(String),

    /// The bounded request timeout expired.
    #[error("timeout after {0} seconds")]
    Timeout(u64),

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The model did not honor the structured-output contract.
    #[error("model declined structured output: {0}")]
    ContractViolation(String),

    /// The structured arguments failed schema validation; carries the full
    /// field-defect list.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service response body was not valid JSON.
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeminiError {
    /// Whether a caller-side retry could plausibly succeed.
    ///
    /// This crate never retries on its own; the retry policy belongs to the
    /// caller.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GeminiError::Service(_) | GeminiError::Timeout(_) | GeminiError::Network(_)
        )
    }
}
