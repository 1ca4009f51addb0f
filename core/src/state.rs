use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Puzzle answers scored at the end of a game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleTally {
    pub attempted: u16,
    pub correct: u16,
}

/// Derives the game state from the cells and scores puzzles once it ends.
#[derive(Clone, Debug, PartialEq)]
pub struct GameTracker {
    state: GameState,
    tally: PuzzleTally,
    puzzles_enabled: bool,
}

impl GameTracker {
    pub fn new(puzzles_enabled: bool) -> Self {
        Self {
            state: GameState::InProgress,
            tally: PuzzleTally::default(),
            puzzles_enabled,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn tally(&self) -> PuzzleTally {
        self.tally
    }

    pub fn puzzles_enabled(&self) -> bool {
        self.puzzles_enabled
    }

    /// Recomputes the state from scratch.
    ///
    /// Returns the new state only on the call that ends the game; once the
    /// game is over every later call is a no-op returning `None`.
    pub fn evaluate(&mut self, field: &MineField) -> Option<GameState> {
        if self.state.is_finished() {
            return None;
        }

        let mut exploded = false;
        let mut safe_revealed: CellCount = 0;
        for (_, cell) in field.iter().filter(|(_, cell)| cell.is_revealed()) {
            if cell.has_mine() {
                exploded = true;
            } else {
                safe_revealed += 1;
            }
        }

        self.state = if exploded {
            GameState::Lost
        } else if safe_revealed == field.safe_cell_count() {
            GameState::Won
        } else {
            return None;
        };

        if self.puzzles_enabled {
            self.score_puzzles(field);
        }
        log::debug!("Game finished: {:?}, puzzles {:?}", self.state, self.tally);
        Some(self.state)
    }

    fn score_puzzles(&mut self, field: &MineField) {
        for (_, cell) in field.iter() {
            let Some(answer) = cell.puzzle_answer() else {
                continue;
            };
            self.tally.attempted += 1;
            if answer == cell.neighbor_mine_count() {
                self.tally.correct += 1;
            }
        }
    }
}
