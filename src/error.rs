use std::time::Duration;

use thiserror::Error;

/// Failure of a single upstream chat-completion call.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("upstream credential is not configured (KIMI_API_KEY)")]
    Configuration,
    #[error("upstream did not answer within {0:?}")]
    Timeout(Duration),
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}
