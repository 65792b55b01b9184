use assert_matches::assert_matches;
use rand::rngs::mock::StepRng;
use tracing_subscriber::EnvFilter;

use super::*;
use crate::schnapsen::Suit;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

fn card(s: &str) -> Card {
    s.parse().unwrap()
}

/// Stacks a deck that deals the listed cards in order: viewer, opponent, principal, stock.
fn deck(order: &str) -> Deck {
    let cards: Vec<Card> = order
        .split_whitespace()
        .map(|c| c.parse().unwrap())
        .collect();
    assert_eq!(cards.len(), 20);
    cards.into_iter().rev().collect()
}

fn new_game() -> Game<StepRng> {
    init_tracing();
    Game::new(StepRng::new(0, 0))
}

/// Plays the viewer's cards in order, advancing the game after every completed trick.
fn play_all(game: &mut Game<StepRng>, cards: &[&str]) -> Progress {
    let mut progress = Progress::default();
    for c in cards {
        assert!(
            game.round().can_select_for_play(card(c), Side::Viewer),
            "{}",
            c
        );
        if game.play(card(c), Side::Viewer).unwrap().is_some() {
            progress = game.after_trick().unwrap();
        }
    }
    progress
}

/// The viewer reaches 66 without closing, against an opponent on five points.
const VIEWER_WINS: &str = "jd ah ac ad kc qd th tc js qs ks td kh jh qh kd ts qc as jc";

#[test]
fn test_new_game() {
    let mut game = Game::seeded(17);
    assert_eq!(game.remaining_points(Side::Viewer), MATCH_POINTS);
    assert_eq!(game.remaining_points(Side::Opponent), MATCH_POINTS);
    assert!(!game.is_over());
    assert_eq!(game.winner(), None);

    game.start_new_game().unwrap();
    assert_eq!(game.round().stock_len(), 9);
    assert_eq!(game.round().player(Side::Viewer).hand().len(), 5);
    assert!(game.can_close_stock());
    assert_eq!(game.previous_winner(), None);
    assert_matches!(game.pop_event(), Some(Event::Dealt { .. }));
    assert_eq!(game.pop_event(), None);
}

#[test]
fn test_seeded_games_repeat() {
    let mut a = Game::seeded(3);
    let mut b = Game::seeded(3);
    a.start_new_round().unwrap();
    b.start_new_round().unwrap();
    assert_eq!(
        a.round().player(Side::Viewer).hand(),
        b.round().player(Side::Viewer).hand()
    );
    assert_eq!(a.round().principal_card(), b.round().principal_card());
}

#[test]
fn test_viewer_wins_hand() {
    let mut game = new_game();
    game.begin_round(deck(VIEWER_WINS)).unwrap();
    assert_eq!(game.round().trump(), Some(Suit::Spade));

    // The opponent takes the first trick, and leads the next one straight away.
    play_all(&mut game, &["jd"]);
    assert_eq!(game.round().score(Side::Opponent), 5);
    assert_eq!(
        game.round().current_trick().get_card(Side::Opponent),
        Some(card("th"))
    );
    assert!(!game.can_close_stock());

    let progress = play_all(&mut game, &["ah", "ac", "ad"]);
    assert_eq!(progress, Progress::default());
    assert_eq!(game.round().score(Side::Viewer), 63);
    assert!(game.can_close_stock());

    let progress = play_all(&mut game, &["kh"]);
    assert_eq!(
        progress,
        Progress {
            round_over: true,
            game_over: false,
        }
    );
    assert_eq!(game.round().score(Side::Viewer), 70);
    assert_eq!(
        game.hands(),
        &[HandResult {
            winner: Side::Viewer,
            points: 2,
        }]
    );
    assert_eq!(game.remaining_points(Side::Viewer), 5);
    assert_eq!(game.remaining_points(Side::Opponent), MATCH_POINTS);

    let events: Vec<_> = std::iter::from_fn(|| game.pop_event()).collect();
    assert_eq!(
        events.last(),
        Some(&Event::HandFinished(Some(HandResult {
            winner: Side::Viewer,
            points: 2,
        })))
    );

    // Finishing again doesn't score twice.
    assert!(game.after_trick().unwrap().round_over);
    assert_eq!(game.hands().len(), 1);
}

#[test]
fn test_viewer_closes_and_wins() {
    let mut game = new_game();
    game.begin_round(deck(
        "ah ad ac as ts th td tc ks qs js jh qh kh jd qd kd jc qc kc",
    ))
    .unwrap();
    assert!(game.close_stock());
    assert!(!game.can_close_stock());
    assert!(!game.close_stock());
    assert_eq!(game.round().stock_len(), 10);

    play_all(&mut game, &["ah", "ad", "ac"]);
    assert!(!game.can_close_stock());
    assert_eq!(game.round().stock_len(), 10);
    assert_eq!(game.round().score(Side::Viewer), 63);

    let progress = play_all(&mut game, &["as"]);
    assert!(progress.round_over);
    assert_eq!(game.round().score(Side::Viewer), 77);
    assert_eq!(
        game.hands(),
        &[HandResult {
            winner: Side::Viewer,
            points: 3,
        }]
    );
    assert_eq!(game.remaining_points(Side::Viewer), 4);
}

#[test]
fn test_failed_close() {
    let mut game = new_game();
    game.begin_round(deck(
        "jh jd jc qh qd th kh kd kc qc as ah td ad tc ac js qs ks ts",
    ))
    .unwrap();
    assert!(game.close_stock());

    // The viewer plays the first card they may, until the hands run out.
    let mut progress = Progress::default();
    while !progress.round_over {
        let round = game.round();
        let c = *round
            .player(Side::Viewer)
            .hand()
            .iter()
            .find(|c| round.can_select_for_play(**c, Side::Viewer))
            .unwrap();
        if game.play(c, Side::Viewer).unwrap().is_some() {
            progress = game.after_trick().unwrap();
        }
    }

    assert_eq!(game.round().score(Side::Viewer), 0);
    assert_eq!(game.round().score(Side::Opponent), 37);
    assert_eq!(game.round().turns().win_count(Side::Opponent), 5);
    // Scored from the snapshot taken when the stock was closed.
    assert_eq!(
        game.hands(),
        &[HandResult {
            winner: Side::Opponent,
            points: 3,
        }]
    );

    // The opponent won, so leads the next hand.
    game.start_new_round().unwrap();
    assert_eq!(game.previous_winner(), Some(Side::Opponent));
    assert!(game.round().current_trick().get_card(Side::Opponent).is_some());
    assert_eq!(game.round().player(Side::Opponent).hand().len(), 4);
    assert!(!game.can_close_stock());
}

#[test]
fn test_marriage_wins_hand() {
    let mut game = new_game();
    game.begin_round(deck(VIEWER_WINS)).unwrap();
    play_all(&mut game, &["jd", "ah", "ac", "ad"]);
    assert_eq!(game.round().score(Side::Viewer), 63);
    assert!(game.round().player(Side::Viewer).position(card("qc")).is_some());

    let progress = game.play_marriage(Side::Viewer, &[card("kc"), card("qc")]);
    assert_eq!(
        progress,
        Progress {
            round_over: true,
            game_over: false,
        }
    );
    assert_eq!(game.round().score(Side::Viewer), 83);
    assert_eq!(
        game.hands(),
        &[HandResult {
            winner: Side::Viewer,
            points: 2,
        }]
    );
}

#[test]
fn test_match_over() {
    let mut game = new_game();
    game.hands = vec![
        HandResult {
            winner: Side::Viewer,
            points: 3,
        },
        HandResult {
            winner: Side::Opponent,
            points: 1,
        },
        HandResult {
            winner: Side::Viewer,
            points: 2,
        },
    ];
    assert_eq!(game.remaining_points(Side::Viewer), 2);
    assert_eq!(game.remaining_points(Side::Opponent), 6);

    game.begin_round(deck(VIEWER_WINS)).unwrap();
    let progress = play_all(&mut game, &["jd", "ah", "ac", "ad", "kh"]);
    assert_eq!(
        progress,
        Progress {
            round_over: true,
            game_over: true,
        }
    );
    assert!(game.is_over());
    assert_eq!(game.winner(), Some(Side::Viewer));
    assert_eq!(game.remaining_points(Side::Viewer), 0);

    let events: Vec<_> = std::iter::from_fn(|| game.pop_event()).collect();
    assert_eq!(events.last(), Some(&Event::MatchOver(Side::Viewer)));

    game.start_new_game().unwrap();
    assert!(game.hands().is_empty());
    assert_eq!(game.remaining_points(Side::Viewer), MATCH_POINTS);
}

#[test]
fn test_remaining_points_stop_at_zero() {
    let mut game = new_game();
    let win = HandResult {
        winner: Side::Viewer,
        points: 3,
    };
    game.hands = vec![win, win, win];
    assert_eq!(game.remaining_points(Side::Viewer), 0);
    assert_eq!(game.remaining_points(Side::Opponent), MATCH_POINTS);
    assert_eq!(game.winner(), Some(Side::Viewer));
}

#[test]
fn test_wash() {
    let mut game = new_game();
    game.begin_round(deck(VIEWER_WINS)).unwrap();
    assert_eq!(hand_result(game.round()), None);
}

#[test]
fn test_points_for_loser_score() {
    struct Case {
        score: u8,
        expect: u8,
    }
    let cases = [
        Case {
            score: 0,
            expect: 3,
        },
        Case {
            score: 1,
            expect: 2,
        },
        Case {
            score: 32,
            expect: 2,
        },
        Case {
            score: 33,
            expect: 1,
        },
        Case {
            score: 65,
            expect: 1,
        },
        Case {
            score: 66,
            expect: 0,
        },
    ];
    for Case { score, expect } in cases {
        assert_eq!(points_for_loser_score(score), expect, "{score}");
    }
}
