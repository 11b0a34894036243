//! Application-level errors

use thiserror::Error;

/// Application errors: rejected input and configuration problems.
///
/// The builders never fail; everything here is raised before they run.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("invalid token {token:?} at position {position}: {reason}")]
    InvalidToken {
        position: usize,
        token: String,
        reason: String,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
