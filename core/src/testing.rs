//! Shared fixtures for unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::*;

pub(crate) fn session(difficulty: Difficulty, size: Coord, mines: &[Coord2]) -> GameSession {
    let field = MineField::from_mine_coords(size, mines).unwrap();
    let collaborators = Collaborators::default().with_puzzles(NumberedRiddles);
    GameSession::with_field(GameConfig::new(difficulty, GridSize::Small), field, collaborators)
}

pub(crate) fn easy_session(size: Coord, mines: &[Coord2]) -> GameSession {
    session(Difficulty::Easy, size, mines)
}

pub(crate) fn puzzle_session(size: Coord, mines: &[Coord2]) -> GameSession {
    session(Difficulty::Medium, size, mines)
}

/// Riddle text that names its own answer.
pub(crate) struct NumberedRiddles;

impl PuzzleSource for NumberedRiddles {
    fn riddle(&mut self, difficulty: Difficulty, count: u8) -> Option<String> {
        Some(format!("{difficulty} riddle for {count}"))
    }
}

#[derive(Clone, Default)]
pub(crate) struct Log {
    pub records: Rc<RefCell<Vec<GameRecord>>>,
    pub cues: Rc<RefCell<Vec<SoundCue>>>,
}

impl StatisticsSink for Log {
    fn record_game(&mut self, record: &GameRecord) -> core::result::Result<(), SinkError> {
        self.records.borrow_mut().push(*record);
        Ok(())
    }
}

impl AudioSink for Log {
    fn play(&mut self, cue: SoundCue) -> core::result::Result<(), SinkError> {
        self.cues.borrow_mut().push(cue);
        Ok(())
    }
}

pub(crate) fn recording_collaborators() -> (Collaborators, Log) {
    let log = Log::default();
    let collaborators = Collaborators::default()
        .with_puzzles(NumberedRiddles)
        .with_statistics(log.clone())
        .with_audio(log.clone());
    (collaborators, log)
}

pub(crate) struct Broken;

impl StatisticsSink for Broken {
    fn record_game(&mut self, _record: &GameRecord) -> core::result::Result<(), SinkError> {
        Err("disk full".into())
    }
}

impl AudioSink for Broken {
    fn play(&mut self, _cue: SoundCue) -> core::result::Result<(), SinkError> {
        Err("no audio device".into())
    }
}
