//! Trick

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{Card, Marriage, Seats, Side, Suit};

/// The trick currently being played.
#[derive(Debug, Clone, Default)]
pub struct PendingTrick {
    /// The card each side has played into the trick, if any.
    pub plays: Seats<Option<Card>>,
    /// The marriage declared by the leader of this trick, if any.
    pub marriage: Option<Marriage>,
    /// The suit of the first card played.
    pub lead: Option<Suit>,
}

impl PendingTrick {
    /// Plays a card into the trick.
    pub fn play(&mut self, side: Side, card: Card) {
        if self.plays[side.other()].is_none() {
            self.lead = Some(card.suit);
        }
        self.plays[side] = Some(card);
    }

    /// Returns the specified side's card in this trick.
    pub fn get_card(&self, side: Side) -> Option<Card> {
        self.plays[side]
    }

    /// Determines the winner, once both sides have played.
    ///
    /// A lone trump beats anything else. Otherwise, a card that doesn't follow the lead loses
    /// to the card that was led, and when both cards follow the lead, the higher value wins.
    pub fn winner(&self, trump: Suit) -> Option<Side> {
        let v = self.plays.viewer?;
        let o = self.plays.opponent?;
        let lead = self.lead?;
        let winner = match (v.suit == trump, o.suit == trump) {
            (true, false) => Side::Viewer,
            (false, true) => Side::Opponent,
            _ if o.suit != lead => Side::Viewer,
            _ if v.suit != lead => Side::Opponent,
            _ if v.value() > o.value() => Side::Viewer,
            _ => Side::Opponent,
        };
        Some(winner)
    }
}

/// A completed trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// The side that captured the trick.
    pub winner: Side,
    /// The viewer's and the opponent's card, in that order.
    pub cards: [Card; 2],
    /// Sum of the captured cards' values.
    pub points: u8,
}

impl Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [v, o] = self.cards;
        write!(f, "[{v}, {o}] -> {} (+{})", self.winner, self.points)
    }
}

impl Turn {
    /// Creates a new [`Turn`].
    pub fn new(winner: Side, cards: [Card; 2]) -> Self {
        Self {
            winner,
            cards,
            points: cards.iter().map(|c| c.value()).sum(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schnapsen::Deck;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn trick(cards: &[&str]) -> PendingTrick {
        let mut trick = PendingTrick::default();
        for s in cards {
            let side = match s.chars().next().unwrap() {
                'V' => Side::Viewer,
                'O' => Side::Opponent,
                _ => unreachable!(),
            };
            trick.play(side, card(&s[1..]));
        }
        trick
    }

    #[test]
    fn test_trick_winner() {
        struct Case {
            trick: PendingTrick,
            expect: Side,
        }

        fn case(cards: &[&str], expect: Side) -> Case {
            Case {
                trick: trick(cards),
                expect,
            }
        }

        // Hearts are trump throughout.
        let cases = [
            case(&["VAS", "OTS"], Side::Viewer),
            case(&["OAS", "VTS"], Side::Opponent),
            case(&["VJS", "OQS"], Side::Opponent),
            case(&["OKS", "VQS"], Side::Opponent),
            case(&["VAS", "OJH"], Side::Opponent),
            case(&["OJH", "VAS"], Side::Opponent),
            case(&["VJH", "OAS"], Side::Viewer),
            case(&["VAS", "OAD"], Side::Viewer),
            case(&["OAD", "VAS"], Side::Opponent),
            case(&["VKH", "OAH"], Side::Opponent),
            case(&["OTH", "VJH"], Side::Opponent),
            case(&["VJC", "OAD"], Side::Viewer),
        ];
        for case in cases {
            let winner = case.trick.winner(Suit::Heart);
            assert_eq!(Some(case.expect), winner, "{:?}", case.trick);
        }
    }

    #[test]
    fn test_trick_incomplete() {
        assert_eq!(trick(&[]).winner(Suit::Heart), None);
        assert_eq!(trick(&["VAS"]).winner(Suit::Heart), None);
        assert_eq!(trick(&["VAS"]).lead, Some(Suit::Spade));
    }

    #[test]
    fn test_every_pair_has_one_winner() {
        let mut deck = Deck::default();
        let cards = deck.take(20);
        for &trump in Suit::all_suits() {
            for &a in &cards {
                for &b in cards.iter().filter(|&&b| b != a) {
                    let mut led = PendingTrick::default();
                    led.play(Side::Viewer, a);
                    led.play(Side::Opponent, b);
                    let mut swapped = PendingTrick::default();
                    swapped.play(Side::Opponent, b);
                    swapped.play(Side::Viewer, a);

                    let winner = led.winner(trump).unwrap();
                    let other = swapped.winner(trump).unwrap();
                    let one_trump = (a.suit == trump) != (b.suit == trump);
                    if one_trump || a.suit == b.suit {
                        assert_eq!(winner, other, "{a} {b} trump {trump}");
                    } else {
                        // Neither card is trump and the suits differ, so the leader wins.
                        assert_eq!(winner, Side::Viewer);
                        assert_eq!(other, Side::Opponent);
                    }
                }
            }
        }
    }

    #[test]
    fn test_turn_points() {
        let turn = Turn::new(Side::Viewer, [card("as"), card("ts")]);
        assert_eq!(turn.points, 21);
        assert_eq!(turn.to_string(), "[A♠, T♠] -> Viewer (+21)");
    }
}
