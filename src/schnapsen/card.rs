//! Schnapsen deck.

use std::convert::{TryFrom, TryInto};
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use ansi_term::ANSIString;
use serde::{Deserialize, Serialize};

use crate::deck;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Heart,
    Diamond,
    Club,
    Spade,
}
impl Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Suit::Heart => "♥",
            Suit::Diamond => "♦",
            Suit::Club => "♣",
            Suit::Spade => "♠",
        })
    }
}
impl TryFrom<char> for Suit {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c {
            'H' | 'h' | '♥' => Suit::Heart,
            'D' | 'd' | '♦' => Suit::Diamond,
            'C' | 'c' | '♣' => Suit::Club,
            'S' | 's' | '♠' => Suit::Spade,
            _ => return Err(()),
        })
    }
}
impl FromStr for Suit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Suit::try_from(c),
            _ => Err(()),
        }
    }
}

impl Suit {
    /// Returns an array of all suits, in deck-building order.
    pub fn all_suits() -> &'static [Suit; 4] {
        static SUITS: [Suit; 4] = [Suit::Heart, Suit::Diamond, Suit::Club, Suit::Spade];
        &SUITS
    }

    /// Position of the suit's bucket when a hand is grouped for display.
    pub fn display_order(self) -> u8 {
        match self {
            Suit::Heart => 0,
            Suit::Spade => 1,
            Suit::Diamond => 2,
            Suit::Club => 3,
        }
    }

    /// Returns a string representation of the suit, decorated with ANSI color codes.
    pub fn to_ansi_string(self) -> ANSIString<'static> {
        use ansi_term::Colour::Red;
        match self {
            Suit::Club | Suit::Spade => self.to_string().into(),
            Suit::Diamond | Suit::Heart => Red.paint(self.to_string()),
        }
    }
}

/// Card rank.
///
/// Only the ten and the court cards are ever dealt. The pip ranks are kept so
/// that the rank set is complete, but no deck built by this crate contains them.
///
/// Ranks are compared for equality by tag, and ordered only by [`value`](Rank::value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}
impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "T",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        })
    }
}
impl TryFrom<char> for Rank {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' | 't' => Rank::Ten,
            'J' | 'j' => Rank::Jack,
            'Q' | 'q' => Rank::Queen,
            'K' | 'k' => Rank::King,
            'A' | 'a' => Rank::Ace,
            _ => return Err(()),
        })
    }
}

impl Rank {
    /// The ranks that make up the schnapsen deck.
    pub fn dealt_ranks() -> &'static [Rank; 5] {
        static RANKS: [Rank; 5] = [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace];
        &RANKS
    }

    /// Point value of the rank, used both for scoring captured tricks and for
    /// deciding which card wins within a suit.
    pub fn value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 2,
            Rank::Queen => 3,
            Rank::King => 4,
            Rank::Ace => 11,
        }
    }
}

/// Stable identity of a card, independent of its selection and visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

/// A schnapsen card, along with its presentation state.
///
/// Two cards are equal if their rank and suit match; the selection and
/// visibility flags are ignored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Card {
    /// Card rank.
    pub rank: Rank,
    /// Card suit.
    pub suit: Suit,
    /// Set while the card is selected by its holder.
    pub selected: bool,
    /// Set if the card is face up to the viewer.
    pub revealed: bool,
}
impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }
}
impl Eq for Card {}
impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
        self.suit.hash(state);
    }
}
impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
impl FromStr for Card {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix("10").map_or_else(|| s.to_string(), |t| format!("T{t}"));
        let mut chars = s.chars();
        let rank = chars.next().ok_or(())?.try_into()?;
        let suit = chars.next().ok_or(())?.try_into()?;
        if chars.next().is_some() {
            return Err(());
        }
        Ok(Card::new(rank, suit))
    }
}

impl Card {
    /// Creates a new face-down, unselected [`Card`].
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            selected: false,
            revealed: false,
        }
    }

    /// The card's stable identity.
    pub fn id(self) -> CardId {
        let suit = match self.suit {
            Suit::Heart => 0,
            Suit::Diamond => 1,
            Suit::Club => 2,
            Suit::Spade => 3,
        };
        CardId(suit * 13 + self.rank as u8)
    }

    /// Returns the card, face up.
    pub fn face_up(mut self) -> Self {
        self.revealed = true;
        self
    }

    /// Returns the card, face down and unselected.
    pub fn face_down(mut self) -> Self {
        self.revealed = false;
        self.selected = false;
        self
    }

    /// Returns the card with the visibility appropriate for the specified holder.
    pub fn shown_to(self, viewer: bool) -> Self {
        if viewer {
            self.face_up()
        } else {
            self.face_down()
        }
    }

    /// Returns true if this card is the queen of the specified suit.
    pub fn is_queen_of(self, suit: Suit) -> bool {
        self.rank == Rank::Queen && self.suit == suit
    }

    /// Returns true if this card is the king of the specified suit.
    pub fn is_king_of(self, suit: Suit) -> bool {
        self.rank == Rank::King && self.suit == suit
    }

    /// Point value of the card.
    pub fn value(self) -> u8 {
        self.rank.value()
    }

    /// Returns a string representation of the card, decorated with ANSI color codes.
    pub fn to_ansi_string(self) -> ANSIString<'static> {
        use ansi_term::Colour::Red;
        match self.suit {
            Suit::Club | Suit::Spade => self.to_string().into(),
            Suit::Diamond | Suit::Heart => Red.paint(self.to_string()),
        }
    }
}

/// A schnapsen deck.
pub type Deck = deck::Deck<Card>;
impl Default for Deck {
    fn default() -> Self {
        itertools::iproduct!(Suit::all_suits(), Rank::dealt_ranks())
            .map(|(&suit, &rank)| Card::new(rank, suit))
            .collect()
    }
}
