use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod deck;
mod schnapsen;
use self::args::Args;
use self::schnapsen::cli_main;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    cli_main(&args)
}
