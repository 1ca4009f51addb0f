//! Contracts for the pieces that live outside the rules: riddle text,
//! statistics persistence and sound.

use serde::{Deserialize, Serialize};

use crate::*;

pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Summary handed to the statistics side once per finished game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub grid: GridSize,
    pub difficulty: Difficulty,
    pub won: bool,
    pub elapsed_secs: u32,
    pub puzzles: PuzzleTally,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Reveal,
    Flag,
    Win,
    Loss,
}

pub trait PuzzleSource {
    /// A riddle whose answer is `count`, if one is known for this difficulty.
    fn riddle(&mut self, difficulty: Difficulty, count: u8) -> Option<String>;
}

pub trait StatisticsSink {
    fn record_game(&mut self, record: &GameRecord) -> core::result::Result<(), SinkError>;
}

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue) -> core::result::Result<(), SinkError>;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct NoPuzzles;

impl PuzzleSource for NoPuzzles {
    fn riddle(&mut self, _difficulty: Difficulty, _count: u8) -> Option<String> {
        None
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct DiscardStatistics;

impl StatisticsSink for DiscardStatistics {
    fn record_game(&mut self, _record: &GameRecord) -> core::result::Result<(), SinkError> {
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: SoundCue) -> core::result::Result<(), SinkError> {
        Ok(())
    }
}

/// Everything a session talks to besides its own board.
pub struct Collaborators {
    pub puzzles: Box<dyn PuzzleSource>,
    pub statistics: Box<dyn StatisticsSink>,
    pub audio: Box<dyn AudioSink>,
}

impl Collaborators {
    pub fn with_puzzles(mut self, puzzles: impl PuzzleSource + 'static) -> Self {
        self.puzzles = Box::new(puzzles);
        self
    }

    pub fn with_statistics(mut self, statistics: impl StatisticsSink + 'static) -> Self {
        self.statistics = Box::new(statistics);
        self
    }

    pub fn with_audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub(crate) fn play(&mut self, cue: SoundCue) {
        if let Err(err) = self.audio.play(cue) {
            log::debug!("Ignoring audio failure for {:?}: {}", cue, err);
        }
    }

    pub(crate) fn record(&mut self, record: &GameRecord) {
        if let Err(err) = self.statistics.record_game(record) {
            log::warn!("Could not record finished game: {}", err);
        }
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            puzzles: Box::new(NoPuzzles),
            statistics: Box::new(DiscardStatistics),
            audio: Box::new(Silent),
        }
    }
}

impl core::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
