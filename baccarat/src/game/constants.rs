use super::entities::Value;

pub const MIN_CARD_VALUE: Value = 1;
pub const MAX_CARD_VALUE: Value = 13;
pub const CARDS_PER_DECK: usize = 52;

/// Tens and face cards are all worth ten points.
pub const FACE_CARD_POINTS: Value = 10;

/// Two cards each for the player and the banker.
pub const INITIAL_CARDS: usize = 4;

/// A side holding this many points or fewer after two cards draws a third.
pub const THIRD_CARD_THRESHOLD: u32 = 15;

pub const MAX_USERNAME_LENGTH: usize = 32;

/// Outcomes accumulated before the history buffer is flushed to its log.
pub const DEFAULT_HISTORY_BATCH: usize = 6;

/// Concurrent sessions the server runs at once.
pub const DEFAULT_MAX_WORKERS: usize = 10;
