//! CLI error types.

use recordgen_core::schema::ValidationFailure;
use recordgen_core::token::TokenError;
use thiserror::Error;

/// Result type alias for the CLI.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur while running a command.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid token: {0}")]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("Invalid input file {path}: {message}")]
    InvalidInputFile { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
