//! Table module holding the resources every session shares.
//!
//! This module implements:
//! - SharedDeck: the one shoe all sessions deal from, persisted after every hand
//! - GameHistory: rolling outcome buffer flushed to an append-only log
//! - Ledger: per-user balances, one file per user
//! - Table: the bundle of all three behind one `Arc`
//!
//! ## Locking
//!
//! The deck and the history each sit behind their own mutex and never hold
//! both at once. The ledger is deliberately unlocked; see [`ledger`].

pub mod config;
pub mod deck;
pub mod errors;
pub mod history;
pub mod ledger;
pub mod state;

pub use config::{ShoeSource, TableConfig};
pub use deck::{DeckStore, SharedDeck};
pub use errors::{DeckError, HistoryError, LedgerError, TableError};
pub use history::GameHistory;
pub use ledger::Ledger;
pub use state::Table;
