use std::collections::VecDeque;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    /// An already revealed numbered cell was clicked again to show its riddle.
    PuzzleRequested,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            PuzzleRequested => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Riddle used when the puzzle source has nothing for this count.
fn fallback_riddle(count: u8) -> String {
    let half = count / 2;
    format!("What is {} + {}?", half, count - half)
}

impl GameSession {
    /// Primary click on a cell.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.field.validate_coords(coords)?;

        if self.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        if self.field[coords].is_revealed {
            return Ok(self.request_puzzle(coords));
        }

        log::debug!("Reveal cell at {:?}", coords);
        self.reveal_region(coords);

        Ok(match self.evaluate() {
            GameState::InProgress => RevealOutcome::Revealed,
            GameState::Lost => RevealOutcome::HitMine,
            GameState::Won => RevealOutcome::Won,
        })
    }

    /// Secondary click on a cell.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.field.validate_coords(coords)?;

        if self.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.field[coords];
        let delta = match (cell.is_revealed, cell.is_flagged) {
            (true, _) => return Ok(MarkOutcome::NoChange),
            (false, true) => {
                cell.is_flagged = false;
                self.flags_left += 1;
                1
            }
            (false, false) if self.flags_left == 0 => return Ok(MarkOutcome::NoChange),
            (false, false) => {
                cell.is_flagged = true;
                self.flags_left -= 1;
                -1
            }
        };

        self.collaborators.play(SoundCue::Flag);
        self.push_budget_changed(delta);
        self.push_cell_changed(coords);
        Ok(MarkOutcome::Changed)
    }

    /// Records the player's answer to the riddle on a revealed numbered cell.
    ///
    /// Answers can be changed until the game ends; only the last one is scored.
    pub fn answer_puzzle(&mut self, coords: Coord2, answer: u8) -> Result<()> {
        let coords = self.field.validate_coords(coords)?;

        if self.is_finished() {
            return Err(GameError::AlreadyEnded);
        }
        if !(1..=8).contains(&answer) {
            return Err(GameError::InvalidAnswer);
        }

        let cell = &mut self.field[coords];
        if !cell.is_numbered() || cell.riddle.is_none() {
            return Err(GameError::NoPuzzle);
        }
        cell.puzzle_answer = Some(answer);

        log::debug!("Puzzle at {:?} answered with {}", coords, answer);
        self.push_cell_changed(coords);
        Ok(())
    }

    fn request_puzzle(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.tracker.puzzles_enabled() {
            return RevealOutcome::NoChange;
        }

        let cell = &self.field[coords];
        let riddle = match &cell.riddle {
            Some(riddle) if cell.is_numbered() => riddle.clone(),
            _ => return RevealOutcome::NoChange,
        };

        self.events
            .push_back(GameEvent::PuzzleRequested { coords, riddle });
        RevealOutcome::PuzzleRequested
    }

    /// Reveals `start` and floods outward through zero-count cells.
    fn reveal_region(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            if self.field[coords].is_revealed {
                continue;
            }

            let count = self.reveal_single_cell(coords, coords == start);
            if count == Some(0) {
                log::trace!("Flooding from {:?}", coords);
                to_visit.extend(
                    self.field
                        .neighbors_of(coords)
                        .filter(|&pos| !self.field[pos].is_revealed),
                );
            }
        }
    }

    /// Returns the neighbor count, or `None` when the cell held a mine.
    fn reveal_single_cell(&mut self, coords: Coord2, user_initiated: bool) -> Option<u8> {
        let cell = &mut self.field[coords];
        cell.is_revealed = true;
        let was_flagged = core::mem::take(&mut cell.is_flagged);
        let has_mine = cell.has_mine;
        let count = cell.neighbor_mine_count;

        if was_flagged {
            self.flags_left += 1;
            self.push_budget_changed(1);
        }

        if has_mine {
            log::debug!("Mine hit at {:?}", coords);
            self.push_cell_changed(coords);
            return None;
        }

        if user_initiated {
            self.collaborators.play(SoundCue::Reveal);
        }

        if count > 0 && self.tracker.puzzles_enabled() {
            let riddle = self
                .collaborators
                .puzzles
                .riddle(self.config.difficulty, count)
                .unwrap_or_else(|| fallback_riddle(count));
            self.field[coords].riddle = Some(riddle);
        }

        log::trace!("Revealed {:?}, mine count: {}", coords, count);
        self.push_cell_changed(coords);
        Some(count)
    }
}
