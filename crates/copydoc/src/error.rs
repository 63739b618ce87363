// ABOUTME: Error types for copydoc configuration loading.
// ABOUTME: Provides CopyDocError with TokenSpec and Options variants; transformation itself never fails.

use std::fmt;
use thiserror::Error;

/// Errors raised while loading token specs or options.
#[derive(Debug, Error)]
pub enum CopyDocError {
    /// The token spec is malformed or contains an empty marker/field.
    #[error("invalid token spec: {0}")]
    TokenSpec(String),

    /// The options document could not be read.
    #[error("invalid options: {0}")]
    Options(String),
}

impl CopyDocError {
    /// Creates a TokenSpec error from any displayable cause.
    pub fn token_spec(err: impl fmt::Display) -> Self {
        CopyDocError::TokenSpec(err.to_string())
    }

    /// Creates an Options error from any displayable cause.
    pub fn options(err: impl fmt::Display) -> Self {
        CopyDocError::Options(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CopyDocError>;
