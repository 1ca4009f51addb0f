use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Puzzle difficulty. Easy plays as plain minesweeper.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn puzzles_enabled(self) -> bool {
        !matches!(self, Self::Easy)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseConfigError(s.into()))
    }
}

/// The three square boards, each with a fixed mine count.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GridSize {
    #[default]
    #[serde(rename = "10x10")]
    Small,
    #[serde(rename = "16x16")]
    Medium,
    #[serde(rename = "20x20")]
    Large,
}

impl GridSize {
    pub const ALL: [GridSize; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Side length of the square board.
    pub const fn size(self) -> Coord {
        match self {
            Self::Small => 10,
            Self::Medium => 16,
            Self::Large => 20,
        }
    }

    pub const fn mines(self) -> CellCount {
        match self {
            Self::Small => 10,
            Self::Medium => 40,
            Self::Large => 70,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "10x10",
            Self::Medium => "16x16",
            Self::Large => "20x20",
        }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GridSize {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|grid| grid.as_str() == s)
            .ok_or_else(|| ParseConfigError(s.into()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown setting: {0:?}")]
pub struct ParseConfigError(String);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub grid: GridSize,
}

impl GameConfig {
    pub const fn new(difficulty: Difficulty, grid: GridSize) -> Self {
        Self { difficulty, grid }
    }

    pub const fn size(&self) -> Coord {
        self.grid.size()
    }

    pub const fn mines(&self) -> CellCount {
        self.grid.mines()
    }

    pub const fn puzzles_enabled(&self) -> bool {
        self.difficulty.puzzles_enabled()
    }

    /// Applies the optional settings of a restart request, keeping the rest.
    pub fn with_overrides(self, difficulty: Option<Difficulty>, grid: Option<GridSize>) -> Self {
        Self {
            difficulty: difficulty.unwrap_or(self.difficulty),
            grid: grid.unwrap_or(self.grid),
        }
    }
}
