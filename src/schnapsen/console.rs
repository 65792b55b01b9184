//! Simple console interface: the viewer plays against the robot at the terminal.

use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

use ansi_term::{ANSIString, ANSIStrings};
use anyhow::bail;
use itertools::Itertools;
use rand::Rng;

use super::{Card, Event, Game, Phase, PlayerState, Progress, Side};
use crate::args::Args;

/// A command typed by the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Play a card.
    Play(Card),
    /// Toggle the selection of a card.
    Select(Card),
    /// Declare a marriage, from the named cards or the current selection.
    Marry(Vec<Card>),
    /// Exchange the jack of trump for the principal card.
    Swap,
    /// Close the stock.
    Close,
    /// Take one of the last two cards.
    Take(Pick),
    /// List the tricks played this hand.
    History,
    /// Show the table again.
    Show,
    /// Leave the game.
    Quit,
}

/// The viewer's choice between the principal card and the last stock card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pick {
    Principal,
    Stock,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace().map(str::to_lowercase);
        let verb = words.next().unwrap_or_default();
        let rest = words.collect_vec();
        let cards = || {
            rest.iter()
                .map(|w| w.parse::<Card>().map_err(|()| format!("not a card: {w}")))
                .collect::<Result<Vec<_>, _>>()
        };
        let one_card = || match cards()?.as_slice() {
            [card] => Ok(*card),
            _ => Err(format!("{verb} takes one card")),
        };
        Ok(match verb.as_str() {
            "play" | "p" => Command::Play(one_card()?),
            "select" | "s" => Command::Select(one_card()?),
            "marry" | "m" => Command::Marry(cards()?),
            "swap" => Command::Swap,
            "close" => Command::Close,
            "take" | "t" => match rest.iter().map(String::as_str).collect_vec().as_slice() {
                ["principal"] | ["p"] => Command::Take(Pick::Principal),
                ["stock"] | ["s"] => Command::Take(Pick::Stock),
                _ => return Err("take principal, or take stock".into()),
            },
            "history" | "h" => Command::History,
            "show" | "hand" | "" => Command::Show,
            "quit" | "q" => Command::Quit,
            _ if rest.is_empty() => verb
                .parse::<Card>()
                .map(Command::Play)
                .map_err(|()| format!("unknown command: {verb}"))?,
            _ => return Err(format!("unknown command: {verb}")),
        })
    }
}

fn prompt<T, S>(prompt: S) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
    S: Display,
{
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        let mut buffer = String::new();
        print!("{prompt}");
        stdout.flush()?;
        if stdin.read_line(&mut buffer)? == 0 {
            bail!("end of input");
        }
        match T::from_str(buffer.trim()) {
            Ok(obj) => return Ok(obj),
            Err(err) => println!("{err}"),
        }
    }
}

pub struct Console {
    color: bool,
}
impl Default for Console {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Console {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn format(&self, s: &ANSIStrings) -> String {
        if self.color {
            s.to_string()
        } else {
            ansi_term::unstyle(s)
        }
    }

    fn format_card(&self, card: Card) -> String {
        self.format(&ANSIStrings(&[card.to_ansi_string()]))
    }

    fn format_hand(&self, cards: &[Card]) -> String {
        let mut parts: Vec<ANSIString> = vec![];
        for (ii, card) in cards.iter().enumerate() {
            if ii > 0 {
                parts.push(" ".into());
            }
            if card.selected {
                parts.push("[".into());
                parts.push(card.to_ansi_string());
                parts.push("]".into());
            } else {
                parts.push(card.to_ansi_string());
            }
        }
        self.format(&ANSIStrings(&parts))
    }

    /// Prints the table as the viewer sees it.
    fn show<R>(&self, game: &Game<R>, state: &PlayerState)
    where
        R: Rng,
    {
        let trump = state
            .trump
            .map(|s| self.format(&ANSIStrings(&[s.to_ansi_string()])))
            .unwrap_or_default();
        let principal = state
            .principal
            .map(|c| self.format_card(c))
            .unwrap_or_else(|| "-".into());
        println!(
            "Trump {trump} | principal {principal} | stock {}{} | score {} - {} | match {} - {}",
            state.stock,
            if state.closed { " (closed)" } else { "" },
            state.score,
            state.other_score,
            game.remaining_points(Side::Viewer),
            game.remaining_points(Side::Opponent),
        );
        for (_, player) in game.round().players().iter() {
            let side = player.side();
            let mut line = format!("{side} has taken {} tricks", state.turns.win_count(side));
            if !player.marriages().is_empty() {
                line += &format!(", declared {}", player.marriages().iter().join(", "));
            }
            println!("{line}");
        }
        if let Some(card) = state.trick.get_card(state.side.other()) {
            println!("Opponent led {}", self.format_card(card));
        }
        println!(
            "Hand: {} (opponent holds {})",
            self.format_hand(state.hand),
            state.other_cards
        );
    }

    /// Lists the tricks played so far this hand.
    fn history(&self, state: &PlayerState) {
        if state.turns.is_empty() {
            println!("No tricks yet this hand");
        }
        for (ii, turn) in state.turns.iter().enumerate() {
            let [v, o] = turn.cards;
            println!(
                "{}. {} {} -> {} (+{})",
                ii + 1,
                self.format_card(v),
                self.format_card(o),
                turn.winner,
                turn.points
            );
        }
    }

    /// Describes an event.
    fn notify(&self, event: &Event) {
        match event {
            Event::Dealt { principal } => {
                println!("New hand. Principal card: {}", self.format_card(*principal));
            }
            Event::CardPlayed { side, card, .. } => {
                println!("{side} plays {}", self.format_card(*card));
            }
            Event::TrickWon { turn, score } => {
                println!("{} takes the trick (+{}, now {score})", turn.winner, turn.points);
            }
            Event::CardsDrawn { stock } => println!("Cards drawn, {stock} left in the stock"),
            Event::MarriageDeclared {
                side,
                marriage,
                score,
            } => {
                println!("{side}: {marriage} (+{}, now {score})", marriage.points());
            }
            Event::TrumpExchanged { side, jack } => {
                println!("{side} exchanges {} for the principal card", self.format_card(*jack));
            }
            Event::StockClosed { side } => println!("{side} closes the stock"),
            Event::FinalCardChosen { side, card } => {
                println!("{side} takes {}", self.format_card(*card));
            }
            Event::SelectionRejected { card, .. } => {
                println!("You can't play {} now", self.format_card(*card));
            }
            Event::HandFinished(Some(result)) => {
                println!("{} wins the hand for {} points", result.winner, result.points);
            }
            Event::HandFinished(None) => println!("The hand is a wash"),
            Event::MatchOver(side) => println!("{side} wins the match!"),
        }
    }

    /// Runs one viewer command. Returns `None` when the viewer quits.
    fn run_command<R: Rng>(
        &self,
        game: &mut Game<R>,
        command: Command,
    ) -> anyhow::Result<Option<Progress>> {
        let progress = match command {
            Command::Play(card) => {
                let round = game.round();
                if round.player(Side::Viewer).position(card).is_none() {
                    println!("You don't hold {}", self.format_card(card));
                    Progress::default()
                } else if !round.can_select_for_play(card, Side::Viewer) {
                    println!("You can't play {} now", self.format_card(card));
                    Progress::default()
                } else if game.play(card, Side::Viewer)?.is_some() {
                    game.after_trick()?
                } else {
                    Progress::default()
                }
            }
            Command::Select(card) => {
                game.toggle_selection(card);
                if game.round().is_marriage_selected(Side::Viewer) {
                    println!("Type 'marry' to declare the marriage");
                }
                Progress::default()
            }
            Command::Marry(cards) => {
                let cards = if cards.is_empty() {
                    game.round().player(Side::Viewer).selected_cards()
                } else {
                    cards
                };
                if game.round().is_valid_marriage(Side::Viewer, &cards) {
                    game.play_marriage(Side::Viewer, &cards)
                } else {
                    println!("That's not a marriage you can declare now");
                    Progress::default()
                }
            }
            Command::Swap => {
                if !game.capture_trump_jack(Side::Viewer) {
                    println!("You can't exchange for the principal card");
                }
                Progress::default()
            }
            Command::Close => {
                if !game.close_stock() {
                    println!("You can't close the stock now");
                }
                Progress::default()
            }
            Command::Take(pick) => {
                let card = match pick {
                    Pick::Principal => game.round().principal_card(),
                    Pick::Stock => game.round().stock_top(),
                };
                let taken = match card {
                    Some(card) => game.choose_final_card(card)?,
                    None => false,
                };
                if !taken {
                    println!("There's nothing to choose right now");
                }
                Progress::default()
            }
            Command::History => {
                self.history(&game.round().player_state(Side::Viewer));
                Progress::default()
            }
            Command::Show => Progress::default(),
            Command::Quit => return Ok(None),
        };
        Ok(Some(progress))
    }
}

/// Plays one match to the end. Returns false if the viewer quit first.
fn play_match<R: Rng>(console: &Console, game: &mut Game<R>) -> anyhow::Result<bool> {
    loop {
        while let Some(event) = game.pop_event() {
            console.notify(&event);
        }
        if game.is_over() {
            return Ok(true);
        }
        if game.round().is_over() {
            prompt::<String, _>("Press enter to deal the next hand ")?;
            game.start_new_round()?;
            continue;
        }

        console.show(game, &game.round().player_state(Side::Viewer));
        let text = match game.round().phase() {
            Phase::FinalChoice => "Take the principal card or the last stock card? ",
            Phase::AwaitingReply(Side::Viewer) => "Reply > ",
            _ => "> ",
        };
        let command = prompt(text)?;
        if console.run_command(game, command)?.is_none() {
            return Ok(false);
        }
    }
}

/// Runs matches at the console until the viewer has had enough.
pub fn cli_main(args: &Args) -> anyhow::Result<()> {
    let console = Console::new(!args.plain);
    let mut game = match args.seed {
        Some(seed) => Game::seeded(seed),
        None => Game::from_entropy(),
    };

    loop {
        game.start_new_game()?;
        let finished = play_match(&console, &mut game)?;
        if args.history {
            serde_json::to_writer(std::io::stderr(), game.hands())?;
            eprintln!();
        }
        if !finished {
            break;
        }
        let again: String = prompt("Play another match? [y/N] ")?;
        if !again.to_lowercase().starts_with('y') {
            break;
        }
    }
    Ok(())
}
