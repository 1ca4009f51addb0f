use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::*;

/// Notifications for the rendering side, drained after each input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CellChanged { coords: Coord2, view: CellView },
    BudgetChanged { delta: i16, remaining: CellCount },
    Tick { elapsed_secs: u32 },
    PuzzleRequested { coords: Coord2, riddle: String },
    Finished(GameRecord),
}

/// Settings for the game that replaces the current one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NewGame {
    pub difficulty: Option<Difficulty>,
    pub grid: Option<GridSize>,
    pub seed: u64,
}

/// One game from the first frame to the final outcome.
///
/// Restarting never reuses any of this state: a new session is built and
/// only the collaborators carry over.
#[derive(Debug)]
pub struct GameSession {
    pub(crate) config: GameConfig,
    pub(crate) field: MineField,
    pub(crate) tracker: GameTracker,
    pub(crate) flags_left: CellCount,
    pub(crate) elapsed_secs: u32,
    pub(crate) collaborators: Collaborators,
    pub(crate) events: VecDeque<GameEvent>,
}

impl GameSession {
    /// Picks a random safe tile and lays out mines around it.
    pub fn start(config: GameConfig, seed: u64, collaborators: Collaborators) -> Result<Self> {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(seed);
        let size = config.size();
        let safe_tile = (rng.random_range(0..size), rng.random_range(0..size));
        let field = RandomMineFieldGenerator::new(rng.random(), safe_tile)
            .generate(size, config.mines())?;

        log::debug!("New {} game on {}, seed {}", config.difficulty, config.grid, seed);
        Ok(Self::with_field(config, field, collaborators))
    }

    /// Plays on a prepared field; board size and mine count come from the field.
    pub fn with_field(config: GameConfig, field: MineField, collaborators: Collaborators) -> Self {
        Self {
            config,
            flags_left: field.mine_count(),
            field,
            tracker: GameTracker::new(config.puzzles_enabled()),
            elapsed_secs: 0,
            collaborators,
            events: VecDeque::new(),
        }
    }

    /// Ends this session and starts another with the same collaborators.
    pub fn restart(self, request: NewGame) -> Result<Self> {
        let config = self.config.with_overrides(request.difficulty, request.grid);
        Self::start(config, request.seed, self.collaborators)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn field(&self) -> &MineField {
        &self.field
    }

    pub fn size(&self) -> Coord {
        self.field.size()
    }

    pub fn safe_tile(&self) -> Option<Coord2> {
        self.field.safe_tile()
    }

    pub fn state(&self) -> GameState {
        self.tracker.state()
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_finished()
    }

    pub fn tally(&self) -> PuzzleTally {
        self.tracker.tally()
    }

    /// Remaining-mine budget shown next to the board.
    pub fn flags_left(&self) -> CellCount {
        self.flags_left
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Advances the clock by one second while the game is running.
    pub fn tick(&mut self) -> u32 {
        if !self.is_finished() {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
            self.events.push_back(GameEvent::Tick {
                elapsed_secs: self.elapsed_secs,
            });
        }
        self.elapsed_secs
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.field.validate_coords(coords)?;
        Ok(self.view_of(coords))
    }

    pub(crate) fn view_of(&self, coords: Coord2) -> CellView {
        let cell = &self.field[coords];

        match (cell.has_mine, self.state()) {
            (true, GameState::Lost) if cell.is_revealed => CellView::TriggeredMine,
            (true, GameState::Lost) => CellView::Mine,
            (true, GameState::Won) => CellView::Flagged,
            _ if !cell.is_revealed => {
                if cell.is_flagged {
                    CellView::Flagged
                } else {
                    CellView::Hidden
                }
            }
            (true, GameState::InProgress) => CellView::TriggeredMine,
            (false, _) => match (cell.puzzle_answer, &cell.riddle) {
                (Some(answer), _) => CellView::PuzzleAnswered(answer),
                (None, Some(_)) => CellView::PuzzlePending,
                (None, None) => CellView::Revealed(cell.neighbor_mine_count),
            },
        }
    }

    /// Re-derives the game state and settles a finished game exactly once.
    pub fn evaluate(&mut self) -> GameState {
        let Some(state) = self.tracker.evaluate(&self.field) else {
            return self.state();
        };

        let won = state == GameState::Won;
        if won && self.flags_left > 0 {
            self.events.push_back(GameEvent::BudgetChanged {
                delta: -i16::try_from(self.flags_left).unwrap_or(i16::MAX),
                remaining: 0,
            });
            self.flags_left = 0;
        }
        self.collaborators
            .play(if won { SoundCue::Win } else { SoundCue::Loss });

        let record = GameRecord {
            grid: self.config.grid,
            difficulty: self.config.difficulty,
            won,
            elapsed_secs: self.elapsed_secs,
            puzzles: self.tracker.tally(),
        };
        self.collaborators.record(&record);
        self.events.push_back(GameEvent::Finished(record));
        state
    }

    pub(crate) fn push_cell_changed(&mut self, coords: Coord2) {
        let view = self.view_of(coords);
        self.events
            .push_back(GameEvent::CellChanged { coords, view });
    }

    pub(crate) fn push_budget_changed(&mut self, delta: i16) {
        self.events.push_back(GameEvent::BudgetChanged {
            delta,
            remaining: self.flags_left,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn start_keeps_safe_tile_clear() {
        for seed in 0..20 {
            let config = GameConfig::new(Difficulty::Medium, GridSize::Medium);
            let session = GameSession::start(config, seed, Collaborators::default()).unwrap();
            let safe_tile = session.safe_tile().unwrap();

            assert_eq!(session.size(), 16);
            assert_eq!(session.field().mine_count(), 40);
            assert_eq!(session.flags_left(), 40);
            assert!(!session.field()[safe_tile].has_mine());
            assert_eq!(session.field()[safe_tile].neighbor_mine_count(), 0);
        }
    }

    #[test]
    fn first_click_on_safe_tile_never_loses() {
        for seed in 0..20 {
            let config = GameConfig::new(Difficulty::Easy, GridSize::Large);
            let mut session = GameSession::start(config, seed, Collaborators::default()).unwrap();
            let safe_tile = session.safe_tile().unwrap();

            session.reveal(safe_tile).unwrap();

            assert_ne!(session.state(), GameState::Lost);
            assert_eq!(session.view_at(safe_tile).unwrap(), CellView::Revealed(0));
        }
    }

    #[test]
    fn restart_builds_a_fresh_board_with_overrides() {
        let config = GameConfig::new(Difficulty::Hard, GridSize::Small);
        let mut session = GameSession::start(config, 1, Collaborators::default()).unwrap();
        let safe_tile = session.safe_tile().unwrap();
        session.reveal(safe_tile).unwrap();
        session.tick();

        let session = session
            .restart(NewGame {
                grid: Some(GridSize::Large),
                seed: 2,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(session.config(), GameConfig::new(Difficulty::Hard, GridSize::Large));
        assert_eq!(session.size(), 20);
        assert_eq!(session.elapsed_secs(), 0);
        assert_eq!(session.state(), GameState::InProgress);
        assert!(session.field().iter().all(|(_, cell)| !cell.is_revealed()));
    }

    #[test]
    fn clock_stops_when_game_ends() {
        let mut session = easy_session(2, &[(0, 0)]);

        assert_eq!(session.tick(), 1);
        assert_eq!(session.tick(), 2);
        session.reveal((0, 0)).unwrap();

        assert_eq!(session.tick(), 2);
        let ticks: Vec<_> = session
            .drain_events()
            .filter(|event| matches!(event, GameEvent::Tick { .. }))
            .collect();
        assert_eq!(ticks.len(), 2);
    }

    #[test]
    fn finished_game_is_reported_once_with_elapsed_time() {
        let (collaborators, log) = recording_collaborators();
        let field = MineField::from_mine_coords(2, &[(0, 0)]).unwrap();
        let config = GameConfig::new(Difficulty::Easy, GridSize::Small);
        let mut session = GameSession::with_field(config, field, collaborators);

        session.tick();
        session.tick();
        session.tick();
        session.reveal((1, 1)).unwrap();
        session.reveal((0, 1)).unwrap();
        session.reveal((1, 0)).unwrap();
        session.evaluate();
        session.evaluate();
        session.reveal((0, 0)).unwrap();

        let records = log.records.borrow();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            GameRecord {
                grid: GridSize::Small,
                difficulty: Difficulty::Easy,
                won: true,
                elapsed_secs: 3,
                puzzles: PuzzleTally::default(),
            }
        );
        assert_eq!(session.state(), GameState::Won);
    }

    #[test]
    fn loss_plays_its_cue_without_reveal_sound() {
        let (collaborators, log) = recording_collaborators();
        let field = MineField::from_mine_coords(2, &[(0, 0)]).unwrap();
        let mut session = GameSession::with_field(GameConfig::default(), field, collaborators);

        session.reveal((0, 0)).unwrap();

        assert_eq!(*log.cues.borrow(), vec![SoundCue::Loss]);
    }

    #[test]
    fn audio_and_statistics_failures_do_not_stop_the_game() {
        let collaborators = Collaborators::default()
            .with_audio(Broken)
            .with_statistics(Broken);
        let field = MineField::from_mine_coords(2, &[(0, 0)]).unwrap();
        let mut session = GameSession::with_field(GameConfig::default(), field, collaborators);

        session.toggle_flag((0, 0)).unwrap();
        let outcome = session.reveal((1, 1)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        session.reveal((0, 1)).unwrap();
        assert_eq!(session.reveal((1, 0)).unwrap(), RevealOutcome::Won);
    }

    #[test]
    fn loss_exposes_every_mine() {
        let mut session = easy_session(3, &[(0, 0), (2, 2)]);
        session.toggle_flag((1, 1)).unwrap();

        session.reveal((0, 0)).unwrap();

        assert_eq!(session.view_at((0, 0)).unwrap(), CellView::TriggeredMine);
        assert_eq!(session.view_at((2, 2)).unwrap(), CellView::Mine);
        assert_eq!(session.view_at((1, 1)).unwrap(), CellView::Flagged);
        assert_eq!(session.view_at((0, 2)).unwrap(), CellView::Hidden);
    }

    #[test]
    fn win_flags_every_mine_and_clears_budget() {
        let mut session = easy_session(2, &[(0, 0)]);

        session.reveal((0, 1)).unwrap();
        session.reveal((1, 0)).unwrap();
        session.reveal((1, 1)).unwrap();

        assert_eq!(session.view_at((0, 0)).unwrap(), CellView::Flagged);
        assert_eq!(session.flags_left(), 0);
        assert!(session.drain_events().any(|event| event
            == GameEvent::BudgetChanged {
                delta: -1,
                remaining: 0
            }));
    }

    #[test]
    fn win_on_huge_budget_clamps_budget_delta() {
        let mines: Vec<Coord2> = (0..157)
            .flat_map(|row| (0..Coord::MAX).map(move |col| (row, col)))
            .collect();
        let field = MineField::from_mine_coords(Coord::MAX, &mines).unwrap();
        let mut session =
            GameSession::with_field(GameConfig::default(), field, Collaborators::default());
        assert_eq!(session.flags_left(), 157 * 255);

        assert_eq!(session.reveal((254, 254)).unwrap(), RevealOutcome::Won);

        assert_eq!(session.flags_left(), 0);
        assert!(session.drain_events().any(|event| event
            == GameEvent::BudgetChanged {
                delta: -i16::MAX,
                remaining: 0
            }));
    }

    #[test]
    fn view_at_rejects_out_of_bounds() {
        let session = easy_session(2, &[(0, 0)]);

        assert_eq!(session.view_at((2, 0)), Err(GameError::InvalidCoords));
    }
}
