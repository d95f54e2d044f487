use thiserror::Error;

/// Failure to pull a JSON object out of free-form model output
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON object found in model output")]
    NoObject,
    #[error("invalid JSON object: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Errors raised inside the sync pipeline.
///
/// None of these reach the host: analyzer errors become an `Error`-category
/// result and publisher errors are logged.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("{0} is missing in config.")]
    MissingCredential(&'static str),

    #[error("rate limited by upstream API")]
    RateLimited,

    #[error("API Error {status}")]
    Api { status: u16 },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse AI response.")]
    Parse(#[from] ExtractError),

    #[error("no text candidate in model response")]
    MissingText,
}

pub type Result<T> = std::result::Result<T, SyncError>;
