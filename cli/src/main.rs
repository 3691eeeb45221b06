use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sweeper_core::*;
use tracing_subscriber::filter::LevelFilter;

use crate::command::{Command, HELP};

mod command;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.tracing_level_filter())?;

    let config = BoardConfig::default();
    let mut board = match args.seed {
        Some(seed) => {
            log::debug!("seed: {}", seed);
            Board::new(BernoulliGenerator::from_seed(seed).generate(config)?)
        }
        None => Board::build(config, &mut rand::rng())?,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "{}", board.intro_message())?;
    writeln!(stdout, "{}", HELP)?;

    let mut lines = stdin.lock().lines();
    while !board.is_terminal() {
        write!(
            stdout,
            "\n{}mines left: {}, closed tiles: {}\n> ",
            board,
            board.mines_left(),
            board.closed_tiles()
        )?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Could not read command")?;

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{}. {}", err, HELP)?;
                continue;
            }
        };

        let result = match command {
            Command::Quit => break,
            Command::Reveal(coords) => board.reveal(coords).map(|outcome| {
                log::info!("reveal {:?}: {:?}", coords, outcome);
                outcome.has_update()
            }),
            Command::Flag(coords) => board.toggle_flag(coords).map(|outcome| {
                log::info!("flag {:?}: {:?}", coords, outcome);
                outcome.has_update()
            }),
        };

        match result {
            Ok(true) => {}
            Ok(false) => writeln!(stdout, "Nothing to do there")?,
            Err(err) => writeln!(stdout, "{}", err)?,
        }
    }

    if let Some(message) = board.outcome_message() {
        writeln!(stdout, "\n{}\n{}", board, message)?;
    }

    Ok(())
}

fn init_logging(level: LevelFilter) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Error initializing logger: {}", err))
}
