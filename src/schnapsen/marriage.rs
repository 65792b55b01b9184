//! Marriages: melding the king and queen of a suit for bonus points.

use std::collections::HashSet;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{Card, MarriageError, Side, Suit};

/// A declared marriage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marriage {
    pub suit: Suit,
    /// Set if the marriage is in the trump suit.
    pub royal: bool,
}

impl Display for Marriage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.royal { "Royal marriage" } else { "Marriage" };
        write!(f, "{kind} in {}", self.suit)
    }
}

impl Marriage {
    /// Creates a new [`Marriage`] in `suit`, royal if `suit` is trump.
    pub fn new(suit: Suit, trump: Option<Suit>) -> Self {
        Self {
            suit,
            royal: trump == Some(suit),
        }
    }

    /// Points credited for declaring the marriage.
    pub fn points(self) -> u8 {
        if self.royal {
            40
        } else {
            20
        }
    }

    /// Returns true if `card` is one of the two melded cards.
    pub fn contains(self, card: Card) -> bool {
        card.is_king_of(self.suit) || card.is_queen_of(self.suit)
    }
}

/// Checks that `cards` are exactly the king and queen of one suit, in either order.
pub fn meld_suit(cards: &[Card]) -> Option<Suit> {
    match cards {
        [a, b] if a.suit == b.suit => {
            let suit = a.suit;
            let pair = (a.is_king_of(suit) && b.is_queen_of(suit))
                || (a.is_queen_of(suit) && b.is_king_of(suit));
            pair.then(|| suit)
        }
        _ => None,
    }
}

/// Validates a proposed marriage for `side`.
///
/// `melded` holds the suits melded so far this round, by either player, and
/// `last_winner` is the winner of the most recent trick, if any trick has been played.
pub fn validate(
    side: Side,
    hand: &[Card],
    cards: &[Card],
    melded: &HashSet<Suit>,
    last_winner: Option<Side>,
) -> Result<Suit, MarriageError> {
    let suit = meld_suit(cards).ok_or(MarriageError::NotAPair)?;
    if let Some(card) = cards.iter().find(|c| !hand.contains(c)) {
        return Err(MarriageError::NotHeld(side, *card));
    }
    if melded.contains(&suit) {
        return Err(MarriageError::AlreadyMelded(suit));
    }
    match last_winner {
        Some(winner) if winner != side => Err(MarriageError::NotLeader(side)),
        _ => Ok(suit),
    }
}
