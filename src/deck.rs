//! A deck of cards.

use std::iter::FromIterator;

use rand::seq::SliceRandom;
use rand::Rng;

/// A deck of cards. The last card in the underlying vector is the top of the deck.
#[derive(Debug, Clone)]
pub struct Deck<C> {
    cards: Vec<C>,
}

impl<C> FromIterator<C> for Deck<C> {
    fn from_iter<T: IntoIterator<Item = C>>(iter: T) -> Self {
        let cards = iter.into_iter().collect();
        Self { cards }
    }
}

impl<C> Deck<C> {
    /// The number of cards remaining in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if the deck has no cards left.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Applies a uniformly random permutation to the deck.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes the top card from the deck.
    pub fn draw(&mut self) -> Option<C> {
        self.cards.pop()
    }

    /// Removes up to `n` cards from the top of the deck.
    pub fn take(&mut self, n: usize) -> Vec<C> {
        let idx = self.cards.len().saturating_sub(n);
        self.cards.split_off(idx)
    }

    /// Places a card on top of the deck.
    pub fn push(&mut self, card: C) {
        self.cards.push(card);
    }

    /// Peeks at the top card.
    pub fn top(&self) -> Option<&C> {
        self.cards.last()
    }
}
