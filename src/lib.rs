//! recap - turn a meeting transcript into a summary and a list of action items
//!
//! The library exposes the two-stage pipeline (summarize, then extract
//! action items) on top of a pluggable completion provider. The `recap`
//! binary is a thin terminal front end over it.

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod llm;
pub mod pipeline;

use thiserror::Error;

/// Main error type for recap
#[derive(Error, Debug)]
pub enum RecapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{0} response did not contain any completion text")]
    EmptyCompletion(&'static str),

    #[error("Malformed structured output: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl RecapError {
    /// Whether the failure is transient and the request may be sent again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(err) => err.is_timeout() || err.is_connect(),
            Self::Status { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecapError>;
