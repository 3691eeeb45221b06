use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Board needs at least one column and one row")]
    InvalidSize,
    #[error("Mine probability must be between 0.0 and 1.0")]
    InvalidProbability,
}

pub type Result<T> = core::result::Result<T, GameError>;
