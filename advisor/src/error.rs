use thiserror::Error;

/// Errors raised while talking to the language model.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// None of the configured environment variables holds an API key.
    #[error("no LLM API key found; set one of: {}", .checked.join(", "))]
    MissingApiKey { checked: Vec<String> },

    #[error("LLM request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("LLM returned HTTP {status}: {body}")]
    StatusError { status: u16, body: String },

    /// The response carried no text.
    #[error("LLM returned an empty response")]
    EmptyResponse,

    #[error("invalid LLM response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
