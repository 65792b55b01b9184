//! Card choice for the automated opponent.
//!
//! This is a greedy, single-ply policy. Given the same hand order it always makes the same reply,
//! and it only consults the random source when leading.

use itertools::Itertools;
use rand::Rng;

use crate::schnapsen::Card;

/// Picks a reply to `led`.
///
/// When holding the led suit, plays the strongest card of that suit if it wins, and the weakest
/// card of that suit otherwise. Without the led suit, throws away the weakest card in hand. Ties
/// go to the card that comes first in hand order. Returns `None` only for an empty hand.
pub fn reply_index(hand: &[Card], led: Card) -> Option<usize> {
    let following = hand
        .iter()
        .enumerate()
        .filter(|(_, c)| c.suit == led.suit)
        .collect_vec();
    if following.is_empty() {
        return hand.iter().position_min_by_key(|c| c.value());
    }
    let strongest = following
        .iter()
        .rev()
        .max_by_key(|(_, c)| c.value())
        .map(|(i, _)| *i);
    match strongest {
        Some(i) if hand[i].value() > led.value() => Some(i),
        _ => following
            .iter()
            .min_by_key(|(_, c)| c.value())
            .map(|(i, _)| *i),
    }
}

/// Picks a card to lead, when there's nothing to reply to.
pub fn lead_index<R: Rng + ?Sized>(hand_size: usize, rng: &mut R) -> usize {
    if hand_size <= 1 {
        0
    } else {
        rng.gen_range(0..hand_size)
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::mock::StepRng;

    use super::*;

    fn hand(cards: &[&str]) -> Vec<Card> {
        cards.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_reply() {
        struct Case {
            hand: &'static [&'static str],
            led: &'static str,
            expect: Option<&'static str>,
        }

        let cases = [
            // Wins with the strongest card of the suit, not the cheapest winner.
            Case {
                hand: &["kh", "th", "ah", "js"],
                led: "qh",
                expect: Some("ah"),
            },
            // Can't win, so gives up the weakest card of the suit.
            Case {
                hand: &["kh", "th", "jh", "as"],
                led: "ah",
                expect: Some("jh"),
            },
            // Can't follow, so dumps the weakest card.
            Case {
                hand: &["as", "kd", "js", "tc"],
                led: "qh",
                expect: Some("js"),
            },
            // Equal values: first in hand order.
            Case {
                hand: &["ad", "jc", "js"],
                led: "kh",
                expect: Some("jc"),
            },
            Case {
                hand: &[],
                led: "kh",
                expect: None,
            },
        ];
        for case in cases {
            let hand = hand(case.hand);
            let led: Card = case.led.parse().unwrap();
            let reply = reply_index(&hand, led).map(|i| hand[i]);
            let expect = case.expect.map(|s| s.parse::<Card>().unwrap());
            assert_eq!(reply, expect, "{:?} vs {}", case.hand, case.led);
        }
    }

    #[test]
    fn test_lead() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(lead_index(1, &mut rng), 0);
        assert_eq!(lead_index(0, &mut rng), 0);
        for _ in 0..10 {
            let mut rng = rand::thread_rng();
            assert!(lead_index(5, &mut rng) < 5);
        }
    }
}
