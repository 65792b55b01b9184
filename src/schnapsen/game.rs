//! Game management.
//!
//! A game is a match of repeated hands. Each player starts with seven match points, and every
//! hand they win takes one to three points off their total. The first player to work their total
//! down to zero wins the match.

use std::collections::VecDeque;
use std::convert::TryFrom;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{
    Card, Deck, Event, Player, Round, RoundError, Seats, Side, Turn, MATCH_POINTS, WINNING_SCORE,
};

#[cfg(test)]
mod test;

/// The result of a finished hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub winner: Side,
    /// Match points awarded, between zero and three.
    pub points: u8,
}

/// What happened to the round and the match after a command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub round_over: bool,
    pub game_over: bool,
}

/// A match of schnapsen between the viewer and the automated opponent.
pub struct Game<R> {
    /// The current round.
    round: Round,
    /// Results of the hands played so far.
    hands: Vec<HandResult>,
    /// Source of randomness for shuffling and the opponent's choices.
    rng: R,
    /// Events collected from finished rounds, and from the game itself.
    events: VecDeque<Event>,
    /// Set once the current round has been scored.
    scored: bool,
}

impl Game<ChaCha8Rng> {
    /// Creates a new game with a reproducible random source.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a new game seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> Game<R> {
    /// Creates a new game. The first round is shuffled, but not dealt.
    pub fn new(mut rng: R) -> Self {
        let players = Seats::from_fn(Player::new);
        let round = Round::random(players, &mut rng);
        Self {
            round,
            hands: vec![],
            rng,
            events: VecDeque::new(),
            scored: false,
        }
    }

    /// Returns an immutable reference to the current round.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Results of the hands played so far, oldest first.
    pub fn hands(&self) -> &[HandResult] {
        &self.hands
    }

    /// Pops the oldest event from the queue of events.
    pub fn pop_event(&mut self) -> Option<Event> {
        self.collect_events();
        self.events.pop_front()
    }

    /// Forgets all previous hands, and starts a new round.
    pub fn start_new_game(&mut self) -> Result<(), RoundError> {
        self.hands.clear();
        self.start_new_round()
    }

    /// Starts a new round with a freshly shuffled deck.
    pub fn start_new_round(&mut self) -> Result<(), RoundError> {
        let mut deck = Deck::default();
        deck.shuffle(&mut self.rng);
        self.begin_round(deck)
    }

    /// Deals a new round from `deck`. If the opponent won the previous hand, they lead at once.
    fn begin_round(&mut self, deck: Deck) -> Result<(), RoundError> {
        self.collect_events();
        let mut players = self.round.players().clone();
        players.for_each_mut(|_, p| p.reset_for_new_round());
        self.round = Round::new(players, deck);
        self.scored = false;
        self.round.deal()?;
        info!(hand = self.hands.len() + 1, "new round");
        if self.previous_winner() == Some(Side::Opponent) {
            self.round.opponent_lead(&mut self.rng)?;
        }
        Ok(())
    }

    /// The winner of the last trick this round or, before the first trick, the winner of the
    /// previous hand.
    pub fn previous_winner(&self) -> Option<Side> {
        self.round
            .turns()
            .last_winner()
            .or_else(|| self.hands.last().map(|h| h.winner))
    }

    /// Returns true if the viewer may close the stock now.
    pub fn can_close_stock(&self) -> bool {
        if self.round.is_closed() || self.round.awaiting_final_choice() {
            return false;
        }
        if self.round.principal_card().is_none() {
            return false;
        }
        self.previous_winner() != Some(Side::Opponent)
    }

    /// Closes the stock on behalf of the viewer, if permitted.
    pub fn close_stock(&mut self) -> bool {
        self.can_close_stock() && self.round.close_stock(Side::Viewer)
    }

    /// Plays a card on behalf of the specified side.
    pub fn play(&mut self, card: Card, side: Side) -> Result<Option<Turn>, RoundError> {
        self.round.play(card, side)
    }

    /// Toggles the selection of one of the viewer's cards.
    pub fn toggle_selection(&mut self, card: Card) -> bool {
        self.round.toggle_selection(Side::Viewer, card)
    }

    /// Exchanges the jack of trump for the principal card.
    pub fn capture_trump_jack(&mut self, side: Side) -> bool {
        self.round.capture_trump_jack_exchange(side)
    }

    /// Takes the viewer's pick of the last two cards.
    pub fn choose_final_card(&mut self, card: Card) -> Result<bool, RoundError> {
        self.round.choose_final_card(card)
    }

    /// Advances the game after a trick has been resolved.
    ///
    /// If the round is over, it is scored. Otherwise, cards are drawn, and if the opponent won
    /// the trick they lead the next one.
    pub fn after_trick(&mut self) -> Result<Progress, RoundError> {
        if self.round.is_over() {
            return Ok(self.finish_round());
        }
        self.round.after_trick(&mut self.rng)?;
        if self.round.turns().last_winner() == Some(Side::Opponent) {
            self.round.opponent_lead(&mut self.rng)?;
        }
        Ok(Progress::default())
    }

    /// Declares a marriage, and scores the round if it pushed the player over the line.
    pub fn play_marriage(&mut self, side: Side, cards: &[Card]) -> Progress {
        self.round.declare_marriage(side, cards);
        if self.round.is_over() {
            self.finish_round()
        } else {
            Progress::default()
        }
    }

    /// Match points the specified side still has to work off.
    pub fn remaining_points(&self, side: Side) -> u8 {
        let won: u32 = self
            .hands
            .iter()
            .filter(|h| h.winner == side)
            .map(|h| u32::from(h.points))
            .sum();
        MATCH_POINTS.saturating_sub(u8::try_from(won).unwrap_or(u8::MAX))
    }

    /// Returns true once the round is over and either player has no match points left.
    pub fn is_over(&self) -> bool {
        self.round.is_over() && self.winner().is_some()
    }

    /// The winner of the match, if any.
    pub fn winner(&self) -> Option<Side> {
        Side::all_sides()
            .iter()
            .copied()
            .find(|&side| self.remaining_points(side) == 0)
    }

    fn collect_events(&mut self) {
        while let Some(event) = self.round.pop_event() {
            self.events.push_back(event);
        }
    }

    fn finish_round(&mut self) -> Progress {
        if self.scored {
            return Progress {
                round_over: true,
                game_over: self.is_over(),
            };
        }
        self.scored = true;
        let result = hand_result(&self.round);
        match result {
            Some(result) => {
                info!(winner = %result.winner, points = result.points, "hand finished");
                self.hands.push(result);
            }
            None => info!("hand finished in a wash"),
        }
        self.collect_events();
        self.events.push_back(Event::HandFinished(result));

        let game_over = self.is_over();
        if let Some(winner) = self.winner().filter(|_| game_over) {
            info!(%winner, "match over");
            self.events.push_back(Event::MatchOver(winner));
        }
        Progress {
            round_over: true,
            game_over,
        }
    }
}

/// Scores a finished round.
///
/// If the stock was closed, the closer wins two or three points for reaching 66, depending on
/// whether the other player had any points when the stock was closed. If the closer falls short,
/// the other player takes the hand, scored from that same snapshot.
///
/// Otherwise, the player who reached 66 wins one to three points, depending on the loser's
/// score. If both or neither reached 66, the hand is a wash.
pub fn hand_result(round: &Round) -> Option<HandResult> {
    if let Some(closed) = round.closed_hand() {
        let points = closed.points();
        let winner = if round.score(closed.initiator) >= WINNING_SCORE {
            closed.initiator
        } else {
            closed.initiator.other()
        };
        return Some(HandResult { winner, points });
    }

    let viewer = round.score(Side::Viewer) >= WINNING_SCORE;
    let opponent = round.score(Side::Opponent) >= WINNING_SCORE;
    let winner = match (viewer, opponent) {
        (true, false) => Side::Viewer,
        (false, true) => Side::Opponent,
        _ => return None,
    };
    Some(HandResult {
        winner,
        points: points_for_loser_score(round.score(winner.other())),
    })
}

/// Match points for a hand won against a player with the specified score.
fn points_for_loser_score(score: u8) -> u8 {
    match score {
        s if s >= WINNING_SCORE => 0,
        33..=65 => 1,
        1..=32 => 2,
        _ => 3,
    }
}
