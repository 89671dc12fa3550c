//! The shared resources behind one physical table.

use log::info;
use std::fs;

use super::{
    config::{ShoeSource, TableConfig},
    deck::{DeckStore, SharedDeck},
    errors::TableError,
    history::GameHistory,
    ledger::Ledger,
};

/// Everything sessions share: the shoe, the outcome history and the
/// balance ledger. Wrap it in an `Arc` and hand a clone to every session.
#[derive(Debug)]
pub struct Table {
    pub deck: SharedDeck,
    pub history: GameHistory,
    pub ledger: Ledger,
}

impl Table {
    /// Open a table under `config.data_dir`, creating the directory if
    /// needed. The shoe is shuffled or resumed per `config.shoe` and the
    /// history log always starts empty.
    pub fn open(config: &TableConfig) -> Result<Self, TableError> {
        fs::create_dir_all(&config.data_dir).map_err(|source| TableError::DataDir {
            path: config.data_dir.clone(),
            source,
        })?;

        let store = DeckStore::new(config.deck_store_path());
        let deck = match config.shoe {
            ShoeSource::Shuffle { num_decks } => SharedDeck::shuffled(num_decks, store)?,
            ShoeSource::Resume => SharedDeck::resume(store)?,
        };
        let history = GameHistory::create(config.history_log_path(), config.history_batch)?;
        let ledger = Ledger::new(&config.data_dir);

        info!(
            "Table open in {} with {} card(s) in the shoe",
            config.data_dir.display(),
            deck.size()
        );

        Ok(Self {
            deck,
            history,
            ledger,
        })
    }
}
