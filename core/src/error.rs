use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines for a safe start")]
    TooManyMines,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Puzzle answers must be between 1 and 8")]
    InvalidAnswer,
    #[error("No puzzle is attached to this cell")]
    NoPuzzle,
}

pub type Result<T> = core::result::Result<T, GameError>;
