//! Per-player state: the hand, captured tricks and declared marriages.

use serde::{Deserialize, Serialize};

use super::{Card, Marriage, Side, Suit};

pub mod robot;

/// A player's holdings for the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    side: Side,
    hand: Vec<Card>,
    tricks: Vec<[Card; 2]>,
    marriages: Vec<Marriage>,
}

impl Player {
    /// Creates a new [`Player`] with nothing in hand.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            hand: vec![],
            tricks: vec![],
            marriages: vec![],
        }
    }

    /// The player's identity.
    pub fn side(&self) -> Side {
        self.side
    }

    /// The cards in hand.
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Mutable access to the cards in hand.
    pub(super) fn hand_mut(&mut self) -> &mut Vec<Card> {
        &mut self.hand
    }

    /// Declared marriages.
    pub fn marriages(&self) -> &[Marriage] {
        &self.marriages
    }

    /// The player's score: the value of every captured card, plus marriage bonuses.
    pub fn score(&self) -> u8 {
        let tricks: u8 = self.tricks.iter().flatten().map(|c| c.value()).sum();
        let marriages: u8 = self.marriages.iter().map(|m| m.points()).sum();
        tricks + marriages
    }

    /// Adds a card to the hand.
    pub fn deal(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Adds a won trick to the player's pile.
    pub fn capture_trick(&mut self, trick: [Card; 2]) {
        self.tricks.push(trick);
    }

    /// Records a declared marriage.
    pub fn declare_marriage(&mut self, marriage: Marriage) {
        self.marriages.push(marriage);
    }

    /// Clears everything but the player's identity.
    pub fn reset_for_new_round(&mut self) {
        self.hand.clear();
        self.tricks.clear();
        self.marriages.clear();
    }

    /// Orders the hand by suit (hearts, spades, diamonds, clubs), then by ascending value.
    pub fn group_and_sort(&mut self) {
        self.hand
            .sort_by_key(|c| (c.suit.display_order(), c.value()));
    }

    /// Returns true if the player holds a card of `suit`.
    pub fn has_suit(&self, suit: Suit) -> bool {
        self.hand.iter().any(|c| c.suit == suit)
    }

    /// Returns the position of `card` in hand.
    pub fn position(&self, card: Card) -> Option<usize> {
        self.hand.iter().position(|c| *c == card)
    }

    /// The currently selected cards, in hand order.
    pub fn selected_cards(&self) -> Vec<Card> {
        self.hand.iter().filter(|c| c.selected).copied().collect()
    }

    /// Clears the selection flag on every card in hand.
    pub fn deselect_all(&mut self) {
        for card in &mut self.hand {
            card.selected = false;
        }
    }

    /// Chooses the card to reply with when `led` has been played against this player.
    pub fn choose_reply_card(&self, led: Card) -> Option<usize> {
        robot::reply_index(&self.hand, led)
    }
}
