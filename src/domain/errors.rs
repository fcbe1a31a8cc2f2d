//! Domain errors for the Sitepulse consolidation core.
//!
//! Adapter failures never escape the fetch orchestrator: it converts
//! every `DomainError` into a `ProviderResult` with `error` set. The
//! consolidation engine has no failure path at all.

use thiserror::Error;

/// Domain-level errors that can occur while fetching provider audits.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Missing API key for provider '{0}'")]
    MissingApiKey(String),

    #[error("Request to {platform} failed: {message}")]
    RequestFailed { platform: String, message: String },

    #[error("{platform} returned {status}: {body}")]
    UnexpectedStatus {
        platform: String,
        status: u16,
        body: String,
    },

    #[error("Failed to parse {platform} response: {message}")]
    MalformedResponse { platform: String, message: String },

    #[error("{platform} test did not complete after {attempts} polls")]
    PollExhausted { platform: String, attempts: u32 },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DomainError {
    /// Map a reqwest transport error for the given provider.
    pub fn request(platform: &str, err: &reqwest::Error) -> Self {
        DomainError::RequestFailed {
            platform: platform.to_string(),
            message: err.to_string(),
        }
    }

    /// Map a payload decoding error for the given provider.
    pub fn malformed(platform: &str, err: impl std::fmt::Display) -> Self {
        DomainError::MalformedResponse {
            platform: platform.to_string(),
            message: err.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
