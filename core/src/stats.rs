use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::*;

/// Totals for one grid size and difficulty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    /// Fastest win in seconds.
    pub best_time: Option<u32>,
    /// Percentage of games won.
    pub win_loss_ratio: f64,
}

impl GameStats {
    pub fn record(&mut self, won: bool, elapsed_secs: u32) {
        self.games_played += 1;
        if won {
            self.wins += 1;
            self.best_time = Some(
                self.best_time
                    .map_or(elapsed_secs, |best| best.min(elapsed_secs)),
            );
        } else {
            self.losses += 1;
        }
        self.win_loss_ratio = f64::from(self.wins) / f64::from(self.games_played) * 100.0;
    }
}

/// Historical statistics for every grid size and difficulty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsTable(BTreeMap<GridSize, BTreeMap<Difficulty, GameStats>>);

impl StatsTable {
    pub fn get(&self, grid: GridSize, difficulty: Difficulty) -> GameStats {
        self.0
            .get(&grid)
            .and_then(|by_difficulty| by_difficulty.get(&difficulty))
            .cloned()
            .unwrap_or_default()
    }

    pub fn record(&mut self, record: &GameRecord) {
        self.0
            .entry(record.grid)
            .or_default()
            .entry(record.difficulty)
            .or_default()
            .record(record.won, record.elapsed_secs);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridSize, Difficulty, &GameStats)> {
        self.0.iter().flat_map(|(&grid, by_difficulty)| {
            by_difficulty
                .iter()
                .map(move |(&difficulty, stats)| (grid, difficulty, stats))
        })
    }
}

impl Default for StatsTable {
    fn default() -> Self {
        let table = GridSize::ALL
            .into_iter()
            .map(|grid| {
                let by_difficulty = Difficulty::ALL
                    .into_iter()
                    .map(|difficulty| (difficulty, GameStats::default()))
                    .collect();
                (grid, by_difficulty)
            })
            .collect();
        Self(table)
    }
}

impl StatisticsSink for StatsTable {
    fn record_game(&mut self, record: &GameRecord) -> core::result::Result<(), SinkError> {
        self.record(record);
        Ok(())
    }
}
