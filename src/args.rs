//! Command line arguments

use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Seed for the shuffle and the opponent's choices, for a reproducible match.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Print cards without color.
    #[arg(short, long)]
    pub plain: bool,

    /// Write the results of each hand to stderr as JSON when the match ends.
    #[arg(long)]
    pub history: bool,
}
