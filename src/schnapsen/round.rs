//! Round management

use std::collections::{HashSet, VecDeque};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::player::robot;
use super::{
    marriage, Card, Deck, Event, Marriage, MarriageError, PendingTrick, Player, Rank, RoundError,
    Seats, Side, Suit, Turn, HAND_SIZE, WINNING_SCORE,
};

mod selection;
mod turns;
pub use turns::Turns;

/// Record of a player closing the stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedHand {
    /// The other player's score at the moment the stock was closed.
    pub score: u8,
    /// The player who closed the stock.
    pub initiator: Side,
}

impl ClosedHand {
    /// Points for the hand: three if the other player had no points when the stock was closed,
    /// and two otherwise.
    pub fn points(self) -> u8 {
        if self.score == 0 {
            3
        } else {
            2
        }
    }
}

/// The phase of a round, derived from its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Cards have not been dealt yet.
    Dealing,
    /// The specified side is expected to lead a trick.
    AwaitingLead(Side),
    /// The specified side is expected to reply to the card that was led.
    AwaitingReply(Side),
    /// Both cards are on the table, and the trick has yet to be cleared.
    TrickResolved,
    /// The viewer must choose between the last stock card and the principal card.
    FinalChoice,
    /// The round is over.
    Over,
}

/// One hand of schnapsen: the deal, followed by tricks until someone reaches 66 or both hands
/// are exhausted.
///
/// ## Gameplay
///
/// Each player is dealt five cards, and the next card is turned face up as the principal card.
/// Its suit is trump for the whole round. After each trick, the winner and then the loser draw
/// from the stock. When a single stock card remains, it is split with the principal card, the
/// viewer choosing if they won the last trick.
///
/// Once the stock is exhausted, or closed by a player, no more cards are drawn and players must
/// follow suit.
///
/// ## Events
///
/// Plays, tricks and other state changes are recorded in a queue of [`Event`]s, which may be
/// drained using [`pop_event`](`Round::pop_event`).
#[derive(Debug)]
pub struct Round {
    deck: Deck,
    players: Seats<Player>,
    turns: Turns,
    trick: PendingTrick,
    principal: Option<Card>,
    trump: Option<Suit>,
    closed: Option<ClosedHand>,
    final_choice: bool,
    melded: HashSet<Suit>,
    dealt: bool,
    events: VecDeque<Event>,
}

/// The state visible to a particular side.
#[derive(Debug)]
pub struct PlayerState<'a> {
    /// The side who has access to this state.
    pub side: Side,
    /// The side's own hand.
    pub hand: &'a [Card],
    /// Number of cards in the other side's hand.
    pub other_cards: usize,
    /// The face-up principal card, if it is still on the table.
    pub principal: Option<Card>,
    /// The trump suit.
    pub trump: Option<Suit>,
    /// Number of cards left in the stock.
    pub stock: usize,
    /// True if the stock has been closed.
    pub closed: bool,
    /// The trick in progress.
    pub trick: &'a PendingTrick,
    /// The tricks played so far this round.
    pub turns: &'a Turns,
    /// The side's score.
    pub score: u8,
    /// The other side's score.
    pub other_score: u8,
}

impl Round {
    /// Creates a new round, with the specified players and deck. No cards are dealt.
    pub fn new(players: Seats<Player>, deck: Deck) -> Self {
        Self {
            deck,
            players,
            turns: Turns::default(),
            trick: PendingTrick::default(),
            principal: None,
            trump: None,
            closed: None,
            final_choice: false,
            melded: HashSet::new(),
            dealt: false,
            events: VecDeque::new(),
        }
    }

    /// Creates a new round with a freshly shuffled deck.
    pub fn random<R: Rng + ?Sized>(players: Seats<Player>, rng: &mut R) -> Self {
        let mut deck = Deck::default();
        deck.shuffle(rng);
        Self::new(players, deck)
    }

    /// Returns the specified player.
    pub fn player(&self, side: Side) -> &Player {
        &self.players[side]
    }

    /// Returns both players.
    pub fn players(&self) -> &Seats<Player> {
        &self.players
    }

    /// Returns the specified player's score.
    pub fn score(&self, side: Side) -> u8 {
        self.players[side].score()
    }

    /// The face-up principal card, if it is still on the table.
    pub fn principal_card(&self) -> Option<Card> {
        self.principal
    }

    /// The trump suit, once dealt.
    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    /// The number of cards left in the stock.
    pub fn stock_len(&self) -> usize {
        self.deck.len()
    }

    /// The card on top of the stock.
    pub fn stock_top(&self) -> Option<Card> {
        self.deck.top().copied()
    }

    /// Returns true if a player has closed the stock.
    pub fn is_closed(&self) -> bool {
        self.closed.is_some()
    }

    /// The record of who closed the stock, and when.
    pub fn closed_hand(&self) -> Option<ClosedHand> {
        self.closed
    }

    /// Returns true while the viewer must choose between the last stock card and the principal.
    pub fn awaiting_final_choice(&self) -> bool {
        self.final_choice
    }

    /// Tricks played during this round.
    pub fn turns(&self) -> &Turns {
        &self.turns
    }

    /// The trick in progress.
    pub fn current_trick(&self) -> &PendingTrick {
        &self.trick
    }

    /// Pops the oldest event from the queue of events.
    pub fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Returns a bundle of state visible to the specified side.
    pub fn player_state(&self, side: Side) -> PlayerState<'_> {
        PlayerState {
            side,
            hand: self.players[side].hand(),
            other_cards: self.players[side.other()].hand().len(),
            principal: self.principal,
            trump: self.trump(),
            stock: self.stock_len(),
            closed: self.is_closed(),
            trick: self.current_trick(),
            turns: &self.turns,
            score: self.score(side),
            other_score: self.score(side.other()),
        }
    }

    /// The current phase of the round.
    pub fn phase(&self) -> Phase {
        if !self.dealt {
            return Phase::Dealing;
        }
        if self.is_over() {
            return Phase::Over;
        }
        if self.final_choice {
            return Phase::FinalChoice;
        }
        match (self.trick.get_card(Side::Viewer), self.trick.get_card(Side::Opponent)) {
            (Some(_), Some(_)) => Phase::TrickResolved,
            (Some(_), None) => Phase::AwaitingReply(Side::Opponent),
            (None, Some(_)) => Phase::AwaitingReply(Side::Viewer),
            (None, None) => {
                Phase::AwaitingLead(self.turns.last_winner().unwrap_or(Side::Viewer))
            }
        }
    }

    /// The round is over once either player reaches 66, or both hands are empty.
    pub fn is_over(&self) -> bool {
        self.players.iter().any(|(_, p)| p.score() >= WINNING_SCORE)
            || self.players.iter().all(|(_, p)| p.hand().is_empty())
    }

    /// Deals five cards to each player, viewer first, and turns up the principal card.
    pub fn deal(&mut self) -> Result<(), RoundError> {
        if self.dealt {
            return Err(RoundError::AlreadyDealt);
        }
        if self.deck.len() < 2 * HAND_SIZE + 1 {
            return Err(RoundError::IncompleteDeck);
        }
        for &side in Side::all_sides() {
            for card in self.deck.take(HAND_SIZE) {
                self.players[side].deal(card.shown_to(side.is_viewer()));
            }
        }
        let principal = self.draw()?.face_up();
        self.principal = Some(principal);
        self.trump = Some(principal.suit);
        self.dealt = true;
        self.sort_hands();
        info!(%principal, stock = self.deck.len(), "dealt");
        self.events.push_back(Event::Dealt { principal });
        Ok(())
    }

    /// Plays `card` from the specified side's hand.
    ///
    /// When the viewer plays first, the opponent's reply is chosen immediately. When the opponent
    /// leads, the card waits on the table for the viewer. Returns the completed trick once both
    /// sides have played.
    pub fn play(&mut self, card: Card, side: Side) -> Result<Option<Turn>, RoundError> {
        let card = self.remove_from_hand(side, card)?;
        self.put_on_table(side, card);

        if self.trick.get_card(side.other()).is_none() {
            match side {
                Side::Opponent => return Ok(None),
                Side::Viewer => {
                    let opponent = &self.players[Side::Opponent];
                    let index = opponent
                        .choose_reply_card(card)
                        .ok_or(RoundError::NoCardToPlay(Side::Opponent))?;
                    let reply = opponent.hand()[index];
                    let reply = self.remove_from_hand(Side::Opponent, reply)?;
                    self.put_on_table(Side::Opponent, reply);
                }
            }
        }
        self.resolve().map(Some)
    }

    /// Has the opponent lead a trick, using the robot's lead policy.
    pub fn opponent_lead<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<Turn>, RoundError> {
        if self.players.iter().all(|(_, p)| p.hand().is_empty()) {
            return Ok(None);
        }
        let hand = self.players[Side::Opponent].hand();
        let index = robot::lead_index(hand.len(), rng);
        let card = *hand
            .get(index)
            .ok_or(RoundError::NoCardToPlay(Side::Opponent))?;
        self.play(card, Side::Opponent)
    }

    /// Clears the finished trick and replenishes hands from the stock.
    ///
    /// The winner of the trick draws first. When only one stock card remains, it is split with
    /// the principal card instead: the opponent picks at random if they won the trick, otherwise
    /// the viewer is asked via [`choose_final_card`](Round::choose_final_card).
    pub fn after_trick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), RoundError> {
        self.trick = PendingTrick::default();
        if self.is_closed() || self.deck.is_empty() {
            return Ok(());
        }
        let Some(winner) = self.turns.last_winner() else {
            return Ok(());
        };

        if self.deck.len() == 1 {
            if winner == Side::Opponent {
                let takes_principal: bool = rng.gen();
                self.split_last_card(Side::Opponent, takes_principal)?;
            } else {
                debug!("waiting for the viewer to choose the final card");
                self.final_choice = true;
            }
            return Ok(());
        }

        for side in [winner, winner.other()] {
            let card = self.draw()?;
            self.players[side].deal(card.shown_to(side.is_viewer()));
        }
        self.sort_hands();
        debug!(stock = self.deck.len(), "cards drawn");
        self.events.push_back(Event::CardsDrawn {
            stock: self.deck.len(),
        });
        Ok(())
    }

    /// Gives the viewer their pick of the principal card or the last stock card. The other card
    /// goes to the opponent. Returns false, without effect, unless the viewer is due to choose
    /// and `card` is one of the two.
    pub fn choose_final_card(&mut self, card: Card) -> Result<bool, RoundError> {
        if !self.final_choice {
            return Ok(false);
        }
        let takes_principal = if self.principal == Some(card) {
            true
        } else if self.deck.top() == Some(&card) {
            false
        } else {
            return Ok(false);
        };
        self.split_last_card(Side::Viewer, takes_principal)?;
        Ok(true)
    }

    /// Declares a marriage. Returns false, without effect, if the marriage isn't valid.
    pub fn declare_marriage(&mut self, side: Side, cards: &[Card]) -> bool {
        let suit = match self.check_marriage(side, cards) {
            Ok(suit) => suit,
            Err(err) => {
                debug!(%side, %err, "marriage rejected");
                return false;
            }
        };
        let marriage = Marriage::new(suit, self.trump);
        self.players[side].declare_marriage(marriage);
        self.melded.insert(suit);

        // The player must lead with one of the melded cards.
        self.players[side].deselect_all();
        self.select(side, cards[0]);
        self.trick.marriage = Some(marriage);

        let score = self.score(side);
        info!(%side, %marriage, score, "marriage declared");
        self.events.push_back(Event::MarriageDeclared {
            side,
            marriage,
            score,
        });
        true
    }

    /// Returns true if `cards` form a marriage that `side` may declare now.
    pub fn is_valid_marriage(&self, side: Side, cards: &[Card]) -> bool {
        self.check_marriage(side, cards).is_ok()
    }

    fn check_marriage(&self, side: Side, cards: &[Card]) -> Result<Suit, MarriageError> {
        marriage::validate(
            side,
            self.players[side].hand(),
            cards,
            &self.melded,
            self.turns.last_winner(),
        )
    }

    /// Swaps the jack of trump from the specified side's hand for the principal card. Returns
    /// false, without effect, if there's no principal card to take, it is already the jack, or
    /// the side doesn't hold the jack.
    pub fn capture_trump_jack_exchange(&mut self, side: Side) -> bool {
        let (Some(principal), Some(trump)) = (self.principal, self.trump) else {
            return false;
        };
        if principal.rank == Rank::Jack {
            return false;
        }
        let Some(index) = self.players[side].position(Card::new(Rank::Jack, trump)) else {
            return false;
        };

        let hand = self.players[side].hand_mut();
        let mut jack = std::mem::replace(&mut hand[index], principal.shown_to(side.is_viewer()));
        jack.selected = false;
        let jack = jack.face_up();
        self.principal = Some(jack);
        self.players[side].group_and_sort();

        info!(%side, took = %principal, "exchanged the jack of trump");
        self.events.push_back(Event::TrumpExchanged { side, jack });
        true
    }

    /// Closes the stock on behalf of `side`: the principal card is returned to the top of the
    /// stock, and no more cards are drawn this round. Returns false, without effect, if the stock
    /// is already closed, or there's no principal card left.
    pub fn close_stock(&mut self, side: Side) -> bool {
        if self.is_closed() || self.final_choice {
            return false;
        }
        let Some(principal) = self.principal.take() else {
            return false;
        };
        let score = self.score(side.other());
        self.closed = Some(ClosedHand {
            score,
            initiator: side,
        });
        self.deck.push(principal.face_down());

        info!(%side, other_score = score, "stock closed");
        self.events.push_back(Event::StockClosed { side });
        true
    }

    fn draw(&mut self) -> Result<Card, RoundError> {
        self.deck.draw().ok_or(RoundError::EmptyStock)
    }

    fn sort_hands(&mut self) {
        self.players.for_each_mut(|_, p| p.group_and_sort());
    }

    fn remove_from_hand(&mut self, side: Side, card: Card) -> Result<Card, RoundError> {
        let index = self.players[side]
            .position(card)
            .ok_or(RoundError::CardNotHeld(side, card))?;
        let mut card = self.players[side].hand_mut().remove(index);
        card.selected = false;
        Ok(card.face_up())
    }

    fn put_on_table(&mut self, side: Side, card: Card) {
        self.trick.play(side, card);
        debug!(%side, %card, id = card.id().0, "card played");
        self.events.push_back(Event::CardPlayed {
            side,
            card,
            score: self.score(side),
        });
    }

    /// Awards the trick on the table to its winner.
    fn resolve(&mut self) -> Result<Turn, RoundError> {
        let trump = self.trump.ok_or(RoundError::NotDealt)?;
        let [viewer, opponent] = [Side::Viewer, Side::Opponent].map(|side| {
            self.trick
                .get_card(side)
                .ok_or(RoundError::NoCardToPlay(side))
        });
        let cards = [viewer?, opponent?];
        let winner = self
            .trick
            .winner(trump)
            .ok_or(RoundError::NoCardToPlay(Side::Viewer))?;
        let turn = Turn::new(winner, cards);
        self.players[winner].capture_trick(cards);
        self.turns.push(turn);

        let score = self.score(winner);
        debug!(%turn, score, "trick won");
        self.events.push_back(Event::TrickWon { turn, score });
        Ok(turn)
    }

    /// Hands out the principal card and the last stock card. `side` takes the principal card if
    /// `takes_principal` is set, and the stock card otherwise; the other side gets the rest.
    fn split_last_card(&mut self, side: Side, takes_principal: bool) -> Result<(), RoundError> {
        let principal = self.principal.take().ok_or(RoundError::NoPrincipalCard)?;
        let stock = self.draw()?;
        let (chosen, rest) = if takes_principal {
            (principal, stock)
        } else {
            (stock, principal)
        };
        self.players[side].deal(chosen.shown_to(side.is_viewer()));
        self.players[side.other()].deal(rest.shown_to(!side.is_viewer()));
        self.final_choice = false;
        self.sort_hands();
        debug!(%side, card = %chosen, "last stock card split");
        self.events.push_back(Event::FinalCardChosen {
            side,
            card: chosen.face_up(),
        });
        Ok(())
    }
}
