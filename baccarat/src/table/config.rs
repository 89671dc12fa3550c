//! Table configuration models.

use std::path::PathBuf;

use crate::game::constants::DEFAULT_HISTORY_BATCH;

pub const DECK_STORE_FILE: &str = "cards.db";
pub const HISTORY_LOG_FILE: &str = "game_history.csv";

/// How a shoe is set up when the table opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShoeSource {
    /// Shuffle this many fresh decks and overwrite the deck store
    Shuffle { num_decks: usize },
    /// Continue from whatever the deck store holds
    Resume,
}

/// Table configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Directory holding the deck store, history log and ledger records
    pub data_dir: PathBuf,

    pub shoe: ShoeSource,

    /// Outcomes per history log line (default: 6)
    pub history_batch: usize,
}

impl TableConfig {
    #[must_use]
    pub fn deck_store_path(&self) -> PathBuf {
        self.data_dir.join(DECK_STORE_FILE)
    }

    #[must_use]
    pub fn history_log_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_LOG_FILE)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            shoe: ShoeSource::Shuffle { num_decks: 1 },
            history_batch: DEFAULT_HISTORY_BATCH,
        }
    }
}
