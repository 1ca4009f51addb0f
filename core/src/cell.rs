use serde::{Deserialize, Serialize};

/// State of a single board cell.
///
/// `has_mine` and `neighbor_mine_count` are fixed when the field is generated;
/// the rest only moves forward during play.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    pub(crate) has_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    pub(crate) neighbor_mine_count: u8,
    pub(crate) riddle: Option<String>,
    pub(crate) puzzle_answer: Option<u8>,
}

impl Cell {
    pub fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Only meaningful for cells without a mine.
    pub fn neighbor_mine_count(&self) -> u8 {
        self.neighbor_mine_count
    }

    pub fn riddle(&self) -> Option<&str> {
        self.riddle.as_deref()
    }

    pub fn puzzle_answer(&self) -> Option<u8> {
        self.puzzle_answer
    }

    /// Revealed, safe and numbered: the cells that can carry a puzzle.
    pub fn is_numbered(&self) -> bool {
        self.is_revealed && !self.has_mine && self.neighbor_mine_count > 0
    }
}

/// What the rendering side should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    PuzzlePending,
    PuzzleAnswered(u8),
    /// The mine that ended the game.
    TriggeredMine,
    Mine,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
