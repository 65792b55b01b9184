//! The game of schnapsen.

use serde::{Deserialize, Serialize};

mod card;
mod console;
mod error;
mod game;
mod marriage;
mod player;
mod round;
mod side;
mod trick;
use self::card::{Card, Deck, Rank, Suit};
use self::error::{MarriageError, RoundError};
use self::game::{Game, HandResult, Progress};
use self::marriage::Marriage;
use self::player::Player;
use self::round::{Phase, PlayerState, Round};
use self::side::{Seats, Side};
use self::trick::{PendingTrick, Turn};

pub use self::console::cli_main;

/// Cards in each player's hand after the deal.
const HAND_SIZE: usize = 5;

/// Score at which a hand is won.
const WINNING_SCORE: u8 = 66;

/// Points each player must work off to win the match.
const MATCH_POINTS: u8 = 7;

/// An event that occurs during the game.
///
/// Events carry enough information for an external layer to mirror the game remotely: who
/// acted, which card was involved, and the resulting score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Cards were dealt, and the principal card turned face up.
    Dealt { principal: Card },
    /// A card was played into the current trick.
    CardPlayed { side: Side, card: Card, score: u8 },
    /// A trick was captured.
    TrickWon { turn: Turn, score: u8 },
    /// Both players drew from the stock.
    CardsDrawn { stock: usize },
    /// A player declared a marriage.
    MarriageDeclared {
        side: Side,
        marriage: Marriage,
        score: u8,
    },
    /// A player exchanged the jack of trump for the principal card.
    TrumpExchanged { side: Side, jack: Card },
    /// A player closed the stock.
    StockClosed { side: Side },
    /// The viewer chose between the last stock card and the principal card.
    FinalCardChosen { side: Side, card: Card },
    /// A player tried to select a card they may not play.
    SelectionRejected { side: Side, card: Card },
    /// The hand is over. Nothing is recorded for a wash.
    HandFinished(Option<HandResult>),
    /// The match is over.
    MatchOver(Side),
}
