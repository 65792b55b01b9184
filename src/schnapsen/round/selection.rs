//! Card selection.
//!
//! A player selects a single card to play, or two cards to build a marriage.

use tracing::debug;

use super::Round;
use crate::schnapsen::{Card, Event, Side};

impl Round {
    /// Returns true if `side` may select `card` for play right now.
    ///
    /// After declaring a marriage, the player must lead one of the melded cards. Once the stock is
    /// closed or exhausted, a player holding the suit of the card played against them must follow
    /// it. Nothing may be played while the viewer is choosing the final stock card.
    pub fn can_select_for_play(&self, card: Card, side: Side) -> bool {
        if let Some(marriage) = self.trick.marriage {
            if !marriage.contains(card) {
                return false;
            }
        }
        if let Some(played) = self.trick.get_card(side.other()) {
            let strict = self.is_closed() || self.deck.is_empty();
            if strict && self.players[side].has_suit(played.suit) && card.suit != played.suit {
                return false;
            }
        }
        !self.final_choice
    }

    /// Toggles the selection of `card` in the specified side's hand. Returns true if the
    /// selection changed.
    ///
    /// A rejected selection is reported as [`Event::SelectionRejected`].
    pub fn toggle_selection(&mut self, side: Side, card: Card) -> bool {
        let Some(index) = self.players[side].position(card) else {
            return false;
        };
        if self.players[side].hand()[index].selected {
            self.players[side].hand_mut()[index].selected = false;
            debug!(%side, %card, "deselected");
            true
        } else {
            self.select(side, card)
        }
    }

    /// Returns true if the side's selected cards form a marriage they may declare.
    pub fn is_marriage_selected(&self, side: Side) -> bool {
        self.is_valid_marriage(side, &self.players[side].selected_cards())
    }

    /// Selects `card`. Other selected cards are deselected, unless together with `card` they
    /// would make a marriage.
    pub(super) fn select(&mut self, side: Side, card: Card) -> bool {
        if !self.can_select_for_play(card, side) {
            debug!(%side, %card, "selection rejected");
            self.events
                .push_back(Event::SelectionRejected { side, card });
            return false;
        }
        let Some(index) = self.players[side].position(card) else {
            return false;
        };

        let mut pair = vec![card];
        pair.extend(self.players[side].selected_cards().first());
        let keep_others = self.is_valid_marriage(side, &pair);

        for (i, c) in self.players[side].hand_mut().iter_mut().enumerate() {
            if i == index {
                c.selected = true;
            } else if !keep_others {
                c.selected = false;
            }
        }
        debug!(%side, %card, "selected");
        true
    }
}
