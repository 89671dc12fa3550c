//! The shared shoe every session deals from.

use log::{debug, error, info};
use std::{
    collections::VecDeque,
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use super::errors::DeckError;
use crate::game::{
    Deal,
    engine::{self, InsufficientCards},
    entities::{self, Card, Side},
};

/// File backing the shoe: one `<value>.<suit>` record per line, front of
/// the file is the next card dealt.
#[derive(Clone, Debug)]
pub struct DeckStore {
    path: PathBuf,
}

impl DeckStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the store with `cards` in draw order.
    pub fn save<'a, I>(&self, cards: I) -> Result<(), DeckError>
    where
        I: IntoIterator<Item = &'a Card>,
    {
        let io_error = |source| DeckError::Io {
            path: self.path.clone(),
            source,
        };
        let file = fs::File::create(&self.path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        for card in cards {
            writeln!(writer, "{card}").map_err(io_error)?;
        }
        writer.flush().map_err(io_error)
    }

    /// Read the store back in draw order. Blank lines are skipped.
    pub fn load(&self) -> Result<Vec<Card>, DeckError> {
        let content = fs::read_to_string(&self.path).map_err(|source| DeckError::Io {
            path: self.path.clone(),
            source,
        })?;
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                line.parse()
                    .map_err(|source| DeckError::Corrupt { line: i + 1, source })
            })
            .collect()
    }
}

/// The single shoe shared by every session at the table.
///
/// All access goes through the internal lock. A deal holds it for the
/// entire draw, score, remove and persist sequence, so two hands can never
/// interleave their cards.
#[derive(Debug)]
pub struct SharedDeck {
    cards: Mutex<VecDeque<Card>>,
    store: DeckStore,
}

impl SharedDeck {
    /// Shuffle a fresh shoe of `num_decks` decks and seed the store with it.
    pub fn shuffled(num_decks: usize, store: DeckStore) -> Result<Self, DeckError> {
        let mut cards = entities::new_shoe(num_decks);
        entities::shuffle(&mut cards);
        store.save(&cards)?;
        info!(
            "Shuffled {} card(s) from {num_decks} deck(s) into {}",
            cards.len(),
            store.path().display()
        );
        Ok(Self::with_cards(cards, store))
    }

    /// Pick the shoe back up from an existing store.
    pub fn resume(store: DeckStore) -> Result<Self, DeckError> {
        let cards = store.load()?;
        info!(
            "Resumed {} card(s) from {}",
            cards.len(),
            store.path().display()
        );
        Ok(Self::with_cards(cards, store))
    }

    /// Use `cards` as-is, front first. The store isn't touched until the
    /// next persist.
    pub fn with_cards(cards: impl IntoIterator<Item = Card>, store: DeckStore) -> Self {
        Self {
            cards: Mutex::new(cards.into_iter().collect()),
            store,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Card>> {
        // The card sequence is only mutated by whole-deal commits, so a
        // panicking holder can't leave it half updated.
        self.cards.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.lock().len()
    }

    /// Copy of the remaining cards in draw order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Card> {
        self.lock().iter().copied().collect()
    }

    /// Take `n` cards off the front, all or nothing.
    pub fn draw(&self, n: usize) -> Result<Vec<Card>, DeckError> {
        let mut cards = self.lock();
        if cards.len() < n {
            return Err(DeckError::InsufficientCards {
                remaining: cards.len(),
            });
        }
        Ok(cards.drain(..n).collect())
    }

    /// Rewrite the store with the remaining cards.
    pub fn persist(&self) -> Result<(), DeckError> {
        let cards = self.lock();
        self.persist_locked(&cards)
    }

    /// Caller holds the lock and passes the guarded cards in.
    fn persist_locked(&self, cards: &VecDeque<Card>) -> Result<(), DeckError> {
        self.store.save(cards)
    }

    /// Deal and score one hand for a wager on `side`.
    ///
    /// The hand is computed against a view of the shoe first and the cards
    /// are only removed once it's known to be complete, so a shoe that
    /// runs dry mid-hand is left exactly as it was. A failed persist is
    /// logged and the hand still stands, so running out of cards is the
    /// only way a deal fails.
    pub fn deal_hand(&self, side: Side) -> Result<Deal, InsufficientCards> {
        let mut cards = self.lock();
        let deal = engine::deal(cards.iter().copied(), side).inspect_err(|_| {
            debug!("Can't deal from {} card(s)", cards.len());
        })?;
        cards.drain(..deal.cards_used());
        debug!("Dealt {deal}, {} card(s) left", cards.len());

        if let Err(e) = self.persist_locked(&cards) {
            error!("Failed to persist deck: {e}");
        }
        Ok(deal)
    }
}
