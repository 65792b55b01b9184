//! Error types

use super::{Card, Side, Suit};

/// Reasons a proposed marriage is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarriageError {
    /// The cards are not the king and queen of a single suit.
    #[error("not a king and queen of the same suit")]
    NotAPair,

    /// The player doesn't actually hold both cards.
    #[error("{0} does not hold {1}")]
    NotHeld(Side, Card),

    /// The suit has already been melded this round.
    #[error("{0} has already been melded")]
    AlreadyMelded(Suit),

    /// Only the player entitled to lead the next trick may meld.
    #[error("{0} is not leading")]
    NotLeader(Side),
}

/// Violated preconditions. These indicate a bug in the caller, not an illegal move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoundError {
    #[error("cards have already been dealt")]
    AlreadyDealt,
    #[error("cards have not been dealt")]
    NotDealt,
    #[error("deck is missing cards")]
    IncompleteDeck,
    #[error("the stock is empty")]
    EmptyStock,
    #[error("there is no principal card")]
    NoPrincipalCard,
    #[error("{0} does not hold {1}")]
    CardNotHeld(Side, Card),
    #[error("{0} has no card to play")]
    NoCardToPlay(Side),
}
