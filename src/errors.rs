use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the range controls, form root and configuration.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Submission blocked: {0}")]
    Blocked(String),
    #[error("Cannot {action} while submission is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = StdResult<T, FormError>;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("Transport setup failed: {0}")]
    Transport(#[from] crate::submission::TransportError),
    #[error("Unknown argument `{0}` (try --help)")]
    Usage(String),
}
