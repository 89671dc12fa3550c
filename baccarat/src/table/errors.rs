//! Table storage error types.

use std::{io, path::PathBuf};
use thiserror::Error;

use crate::game::entities::CardError;

/// Shared deck errors
#[derive(Debug, Error)]
pub enum DeckError {
    /// The shoe can't furnish every card the request needs
    #[error("Not enough cards: {remaining} remaining")]
    InsufficientCards { remaining: usize },

    /// Deck store couldn't be read or written
    #[error("Deck store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Deck store holds something that isn't a card
    #[error("Deck store line {line}: {source}")]
    Corrupt {
        line: usize,
        #[source]
        source: CardError,
    },
}

/// Balance ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No record has been written for the user yet
    #[error("No balance recorded for {0}")]
    NotFound(String),

    /// Record exists but couldn't be read or written
    #[error("Ledger record {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Record isn't a decimal integer
    #[error("Ledger record {path} is not a balance: {content:?}")]
    Corrupt { path: PathBuf, content: String },
}

impl LedgerError {
    /// Whether the failure is just a missing record rather than a
    /// storage problem.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Game history errors
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors opening a table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    History(#[from] HistoryError),
}
