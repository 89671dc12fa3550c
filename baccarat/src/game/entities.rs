use rand::seq::SliceRandom;
use std::{
    fmt::{self},
    str::FromStr,
};
use thiserror::Error;

use super::constants;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Club, Self::Spade, Self::Diamond, Self::Heart];

    /// The 1-based index used by the deck store and the wire protocol.
    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            Self::Club => 1,
            Self::Spade => 2,
            Self::Diamond => 3,
            Self::Heart => 4,
        }
    }

    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Club),
            2 => Some(Self::Spade),
            3 => Some(Self::Diamond),
            4 => Some(Self::Heart),
            _ => None,
        }
    }
}

/// Placeholder for card values.
pub type Value = u8;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum CardError {
    #[error("card value {0} is outside 1..=13")]
    InvalidValue(Value),
    #[error("card suit {0} is outside 1..=4")]
    InvalidSuit(u8),
    #[error("malformed card record {0:?}")]
    Malformed(String),
}

/// A card is a tuple of a value (ace=1u8 ... king=13u8) and a suit.
///
/// Cards print and parse as `<value>.<suit index>`, e.g. `12.3` is the
/// queen of diamonds. That is the form used on the wire and in the deck
/// store.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card(pub Value, pub Suit);

impl Card {
    pub fn new(value: Value, suit: Suit) -> Result<Self, CardError> {
        if !(constants::MIN_CARD_VALUE..=constants::MAX_CARD_VALUE).contains(&value) {
            return Err(CardError::InvalidValue(value));
        }
        Ok(Self(value, suit))
    }

    /// Baccarat point value. Face cards count as ten, everything else
    /// counts its face value.
    #[must_use]
    pub fn points(&self) -> u32 {
        u32::from(self.0.min(constants::FACE_CARD_POINTS))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.0, self.1.index())
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CardError::Malformed(s.to_string());
        let (value, suit) = s.trim().split_once('.').ok_or_else(malformed)?;
        let value: Value = value.parse().map_err(|_| malformed())?;
        let suit: u8 = suit.parse().map_err(|_| malformed())?;
        let suit = Suit::from_index(suit).ok_or(CardError::InvalidSuit(suit))?;
        Self::new(value, suit)
    }
}

/// Build an unshuffled shoe of `num_decks` standard 52 card decks,
/// value-major like a fresh pack.
#[must_use]
pub fn new_shoe(num_decks: usize) -> Vec<Card> {
    let mut cards = Vec::with_capacity(num_decks * constants::CARDS_PER_DECK);
    for _ in 0..num_decks {
        for value in constants::MIN_CARD_VALUE..=constants::MAX_CARD_VALUE {
            for suit in Suit::ALL {
                cards.push(Card(value, suit));
            }
        }
    }
    cards
}

pub fn shuffle(cards: &mut [Card]) {
    cards.shuffle(&mut rand::rng());
}

/// The side of the table a wager is placed on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Side {
    Player,
    Banker,
}

impl Side {
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Player => 'P',
            Self::Banker => 'B',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
#[error("side must be P or B, got {0:?}")]
pub struct InvalidSide(pub String);

impl FromStr for Side {
    type Err = InvalidSide;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "P" => Ok(Self::Player),
            "B" => Ok(Self::Banker),
            other => Err(InvalidSide(other.to_string())),
        }
    }
}

/// Which side took the hand.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Winner {
    Player,
    Banker,
    Draw,
}

impl Winner {
    /// Symbol written to the game history log.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Player => 'P',
            Self::Banker => 'B',
            Self::Draw => 'D',
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl From<Side> for Winner {
    fn from(value: Side) -> Self {
        match value {
            Side::Player => Self::Player,
            Side::Banker => Self::Banker,
        }
    }
}

/// Type alias for whole chips. Balances are signed since a loss is
/// subtracted from whatever the ledger holds at deal time, which another
/// session may have lowered after the bet was placed.
pub type Chips = i64;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Username(String);

impl Username {
    /// Usernames double as ledger file names, so anything outside
    /// `[A-Za-z0-9_-]` is replaced with an underscore.
    pub fn new(s: &str) -> Self {
        let mut username: String = s
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        username.truncate(constants::MAX_USERNAME_LENGTH);
        Self(username)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for Username {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
