use std::str::FromStr;

use sweeper_core::{Coord, Coord2};
use thiserror::Error;

pub const HELP: &str = "commands: r X Y (reveal), f X Y (toggle flag), q (quit)";

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}")]
    Unknown(String),
    #[error("Expected two coordinates: column and row")]
    MissingCoords,
    #[error("Invalid coordinate {0:?}")]
    BadCoord(String),
    #[error("Unexpected input after the coordinates")]
    TrailingInput,
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ParseError::Empty);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "q" | "quit" => return Ok(Command::Quit),
            "r" | "reveal" => Command::Reveal,
            "f" | "flag" => Command::Flag,
            _ => return Err(ParseError::Unknown(verb.to_string())),
        };

        let x = parse_coord(words.next())?;
        let y = parse_coord(words.next())?;
        if words.next().is_some() {
            return Err(ParseError::TrailingInput);
        }

        Ok(command((x, y)))
    }
}

fn parse_coord(word: Option<&str>) -> Result<Coord, ParseError> {
    let word = word.ok_or(ParseError::MissingCoords)?;
    word.parse()
        .map_err(|_| ParseError::BadCoord(word.to_string()))
}
