//! Dealing and scoring for a single hand.
//!
//! The engine never touches the shared shoe. It reads cards from any
//! iterator and reports how many it consumed, so the caller can commit the
//! removal only once the whole hand is known to be dealable.

use std::{cmp::Ordering, fmt};
use thiserror::Error;

use super::{
    constants::{INITIAL_CARDS, THIRD_CARD_THRESHOLD},
    entities::{Card, Chips, Side, Winner},
};

#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("not enough cards to deal")]
pub struct InsufficientCards;

/// Reduce a point sum to its baccarat total.
#[must_use]
pub fn normalize(points: u32) -> u8 {
    // Always < 10, so the narrowing is lossless.
    (points % 10) as u8
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Raw point sum before normalization.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.cards.iter().map(Card::points).sum()
    }

    #[must_use]
    pub fn total(&self) -> u8 {
        normalize(self.points())
    }

    fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    fn wants_third_card(&self) -> bool {
        self.points() <= THIRD_CARD_THRESHOLD
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = self
            .cards
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("|");
        write!(f, "{repr}")
    }
}

/// How a wager fares against the winning side.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Settlement {
    Won,
    Lost,
    /// The hand was drawn and the wager is refunded.
    Push,
}

impl Settlement {
    #[must_use]
    pub fn resolve(side: Side, winner: Winner) -> Self {
        match winner {
            Winner::Draw => Self::Push,
            winner if winner == Winner::from(side) => Self::Won,
            _ => Self::Lost,
        }
    }

    /// Even-money payout applied to `balance`.
    #[must_use]
    pub fn apply(self, balance: Chips, bet: Chips) -> Chips {
        match self {
            Self::Won => balance.saturating_add(bet),
            Self::Lost => balance.saturating_sub(bet),
            Self::Push => balance,
        }
    }
}

/// A fully dealt and scored hand.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deal {
    pub player: Hand,
    pub banker: Hand,
    pub winner: Winner,
    /// The side the caller wagered on.
    pub side: Side,
}

impl Deal {
    /// Number of cards this hand took off the front of the shoe.
    #[must_use]
    pub fn cards_used(&self) -> usize {
        self.player.len() + self.banker.len()
    }

    #[must_use]
    pub fn settlement(&self) -> Settlement {
        Settlement::resolve(self.side, self.winner)
    }

    /// Textual result, e.g. `Player wins with 7 points.` or `Draw`.
    #[must_use]
    pub fn result(&self) -> String {
        match self.winner {
            Winner::Player => format!("Player wins with {} points.", self.player.total()),
            Winner::Banker => format!("Banker wins with {} points.", self.banker.total()),
            Winner::Draw => "Draw".to_string(),
        }
    }
}

impl fmt::Display for Deal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P|{},B|{} - {}",
            self.player,
            self.banker,
            self.result()
        )
    }
}

/// Deal one hand from the front of `cards`.
///
/// Cards go player, banker, player, banker. Each side holding 15 points or
/// fewer then draws one more card, the player first. The draws are
/// independent of each other.
///
/// # Errors
///
/// Returns [`InsufficientCards`] if `cards` runs out before the hand is
/// complete. Nothing is consumed from the caller's shoe in that case since
/// the iterator is only a view of it.
pub fn deal<I>(cards: I, side: Side) -> Result<Deal, InsufficientCards>
where
    I: IntoIterator<Item = Card>,
{
    let mut cards = cards.into_iter();
    let mut next = || cards.next().ok_or(InsufficientCards);

    let mut player = Hand::default();
    let mut banker = Hand::default();
    for _ in 0..INITIAL_CARDS / 2 {
        player.push(next()?);
        banker.push(next()?);
    }

    if player.wants_third_card() {
        player.push(next()?);
    }
    if banker.wants_third_card() {
        banker.push(next()?);
    }

    let winner = match player.total().cmp(&banker.total()) {
        Ordering::Greater => Winner::Player,
        Ordering::Less => Winner::Banker,
        Ordering::Equal => Winner::Draw,
    };

    Ok(Deal {
        player,
        banker,
        winner,
        side,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Suit;

    fn cards(records: &[&str]) -> Vec<Card> {
        records.iter().map(|r| r.parse().unwrap()).collect()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(0), 0);
        assert_eq!(normalize(7), 7);
        assert_eq!(normalize(10), 0);
        assert_eq!(normalize(17), 7);
        assert_eq!(normalize(20), 0);
        assert_eq!(normalize(29), 9);
        assert_eq!(normalize(30), 0);
    }

    #[test]
    fn test_deal_order_is_interleaved() {
        // Both sides over 15 so nobody draws a third card.
        let shoe = cards(&["10.1", "9.1", "8.1", "13.2"]);
        let deal = deal(shoe, Side::Player).unwrap();
        assert_eq!(deal.player.cards(), &cards(&["10.1", "8.1"])[..]);
        assert_eq!(deal.banker.cards(), &cards(&["9.1", "13.2"])[..]);
        assert_eq!(deal.cards_used(), 4);
    }

    #[test]
    fn test_player_wins() {
        // Player 10 + 7 = 17 stands on 7. Banker 9 + 4 = 13 draws a ten,
        // 23 normalizes to 3.
        let shoe = cards(&["10.1", "9.1", "7.1", "4.1", "10.2"]);
        let deal = deal(shoe, Side::Player).unwrap();
        assert_eq!(deal.player.len(), 2);
        assert_eq!(deal.banker.len(), 3);
        assert_eq!(deal.player.total(), 7);
        assert_eq!(deal.banker.total(), 3);
        assert_eq!(deal.winner, Winner::Player);
        assert_eq!(deal.settlement(), Settlement::Won);
        assert_eq!(deal.result(), "Player wins with 7 points.");
    }

    #[test]
    fn test_banker_wins_and_player_bet_loses() {
        // Player 9 + 9 = 18 -> 8. Banker 10 + 9 = 19 -> 9.
        let shoe = cards(&["9.1", "10.1", "9.2", "9.3"]);
        let deal = deal(shoe, Side::Player).unwrap();
        assert_eq!(deal.winner, Winner::Banker);
        assert_eq!(deal.settlement(), Settlement::Lost);
        assert_eq!(deal.result(), "Banker wins with 9 points.");
    }

    #[test]
    fn test_draw_with_third_cards() {
        // Both sides 10 + 5 = 15 draw a third ten-point card, 25 -> 5.
        let shoe = cards(&["10.1", "10.3", "5.1", "5.2", "10.2", "13.1"]);
        let deal = deal(shoe, Side::Banker).unwrap();
        assert_eq!(deal.player.cards(), &cards(&["10.1", "5.1", "10.2"])[..]);
        assert_eq!(deal.banker.cards(), &cards(&["10.3", "5.2", "13.1"])[..]);
        assert_eq!(deal.winner, Winner::Draw);
        assert_eq!(deal.settlement(), Settlement::Push);
        assert_eq!(deal.result(), "Draw");
    }

    #[test]
    fn test_third_card_threshold_is_inclusive() {
        // Player 8 + 8 = 16 stands, banker 8 + 7 = 15 draws.
        let shoe = cards(&["8.1", "8.2", "8.3", "7.1", "1.1"]);
        let deal = deal(shoe, Side::Player).unwrap();
        assert_eq!(deal.player.len(), 2);
        assert_eq!(deal.banker.len(), 3);
        assert_eq!(deal.banker.points(), 16);
    }

    #[test]
    fn test_face_cards_count_ten() {
        // Player K + Q = 20 -> 0, banker J + 9 = 19 -> 9.
        let shoe = cards(&["13.1", "11.1", "12.1", "9.1"]);
        let deal = deal(shoe, Side::Banker).unwrap();
        assert_eq!(deal.player.total(), 0);
        assert_eq!(deal.banker.total(), 9);
        assert_eq!(deal.settlement(), Settlement::Won);
    }

    #[test]
    fn test_fewer_than_four_cards() {
        let shoe = cards(&["9.1", "9.2", "9.3"]);
        assert_eq!(deal(shoe, Side::Player), Err(InsufficientCards));
        assert_eq!(deal(Vec::new(), Side::Player), Err(InsufficientCards));
    }

    #[test]
    fn test_missing_third_card() {
        let shoe = cards(&["9.1", "9.2", "2.1", "2.2"]);
        assert_eq!(deal(shoe, Side::Player), Err(InsufficientCards));
    }

    #[test]
    fn test_only_consumes_what_it_needs() {
        let shoe = cards(&["10.1", "9.1", "8.1", "13.2", "1.1", "2.1"]);
        let mut iter = shoe.into_iter();
        let deal = deal(iter.by_ref(), Side::Player).unwrap();
        assert_eq!(deal.cards_used(), 4);
        assert_eq!(iter.next(), Some(Card(1, Suit::Club)));
    }

    #[test]
    fn test_deal_display() {
        let shoe = cards(&["10.1", "9.1", "7.1", "4.1", "10.2"]);
        let deal = deal(shoe, Side::Player).unwrap();
        assert_eq!(
            deal.to_string(),
            "P|10.1|7.1,B|9.1|4.1|10.2 - Player wins with 7 points."
        );
    }

    #[test]
    fn test_settlement_resolve() {
        assert_eq!(Settlement::resolve(Side::Player, Winner::Player), Settlement::Won);
        assert_eq!(Settlement::resolve(Side::Banker, Winner::Banker), Settlement::Won);
        assert_eq!(Settlement::resolve(Side::Player, Winner::Banker), Settlement::Lost);
        assert_eq!(Settlement::resolve(Side::Banker, Winner::Player), Settlement::Lost);
        assert_eq!(Settlement::resolve(Side::Player, Winner::Draw), Settlement::Push);
        assert_eq!(Settlement::resolve(Side::Banker, Winner::Draw), Settlement::Push);
    }

    #[test]
    fn test_settlement_apply() {
        assert_eq!(Settlement::Won.apply(200, 50), 250);
        assert_eq!(Settlement::Lost.apply(200, 50), 150);
        assert_eq!(Settlement::Push.apply(200, 50), 200);
        assert_eq!(Settlement::Won.apply(Chips::MAX, 1), Chips::MAX);
    }
}
