//! Tricks completed during a round.

use delegate::delegate;

use crate::schnapsen::{Side, Turn, HAND_SIZE};

/// Completed tricks, in the order they were played.
#[derive(Debug, Clone, Default)]
pub struct Turns {
    turns: Vec<Turn>,
}

impl Turns {
    delegate! {
        to self.turns {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn last(&self) -> Option<&Turn>;
            pub fn iter(&self) -> std::slice::Iter<'_, Turn>;
        }
    }

    /// Appends a completed trick. A round has at most one trick per pair of cards dealt.
    pub fn push(&mut self, turn: Turn) {
        assert!(self.len() < 2 * HAND_SIZE);
        self.turns.push(turn);
    }

    /// The winner of the most recent trick.
    pub fn last_winner(&self) -> Option<Side> {
        self.last().map(|t| t.winner)
    }

    /// Counts the tricks won by the specified side.
    pub fn win_count(&self, side: Side) -> usize {
        self.turns.iter().filter(|t| t.winner == side).count()
    }
}
