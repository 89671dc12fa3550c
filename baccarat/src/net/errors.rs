//! Protocol error types for parsing client command lines.

use thiserror::Error;

use crate::game::entities::InvalidSide;

/// Errors that can occur while parsing a command line
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// A required field is missing
    #[error("{command} requires a {field}")]
    MissingField {
        command: &'static str,
        field: &'static str,
    },

    /// Amount or balance isn't a non-negative whole number
    #[error("{0:?} is not a valid amount")]
    InvalidAmount(String),

    /// Wager side isn't P or B
    #[error(transparent)]
    InvalidSide(#[from] InvalidSide),

    /// Username is blank after sanitizing
    #[error("username must not be empty")]
    EmptyUsername,

    /// Line exceeds the maximum allowed length
    #[error("line exceeds maximum length of {max} bytes")]
    LineTooLong { max: usize },
}

/// Result type for parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
