use std::collections::BTreeMap;

use rand::prelude::*;

use crate::*;

/// Riddles keyed by difficulty, then by the answer they lead to.
pub type RiddleTable = BTreeMap<Difficulty, BTreeMap<u8, Vec<String>>>;

/// Riddle collection read from JSON, picking a random riddle per request.
///
/// The JSON shape is `{"medium": {"1": ["..."], "2": [...]}, "hard": {...}}`.
#[derive(Clone, Debug)]
pub struct PuzzleBook {
    riddles: RiddleTable,
    rng: SmallRng,
}

impl PuzzleBook {
    pub fn new(riddles: RiddleTable, seed: u64) -> Self {
        Self {
            riddles,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_json(json: &str, seed: u64) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?, seed))
    }

    pub fn riddles_for(&self, difficulty: Difficulty, count: u8) -> &[String] {
        self.riddles
            .get(&difficulty)
            .and_then(|by_count| by_count.get(&count))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of riddles across every difficulty.
    pub fn len(&self) -> usize {
        self.riddles
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PuzzleSource for PuzzleBook {
    fn riddle(&mut self, difficulty: Difficulty, count: u8) -> Option<String> {
        let choices = self
            .riddles
            .get(&difficulty)
            .and_then(|by_count| by_count.get(&count))?;
        let riddle = choices.choose(&mut self.rng).cloned();
        if riddle.is_none() {
            log::warn!("No {} riddle for {}", difficulty, count);
        }
        riddle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK: &str = r#"{
        "medium": {"1": ["One riddle", "Another one"], "2": ["Two riddle"]},
        "hard": {"3": ["Three riddle"]}
    }"#;

    #[test]
    fn loads_nested_json_table() {
        let book = PuzzleBook::from_json(BOOK, 0).unwrap();

        assert_eq!(book.len(), 4);
        assert_eq!(book.riddles_for(Difficulty::Medium, 2), ["Two riddle"]);
        assert!(book.riddles_for(Difficulty::Easy, 1).is_empty());
    }

    #[test]
    fn picks_a_riddle_for_the_requested_answer() {
        let mut book = PuzzleBook::from_json(BOOK, 9).unwrap();

        for _ in 0..10 {
            let riddle = book.riddle(Difficulty::Medium, 1).unwrap();
            assert!(riddle == "One riddle" || riddle == "Another one");
        }
        assert_eq!(book.riddle(Difficulty::Hard, 3).as_deref(), Some("Three riddle"));
    }

    #[test]
    fn unknown_entries_have_no_riddle() {
        let mut book = PuzzleBook::from_json(BOOK, 0).unwrap();

        assert_eq!(book.riddle(Difficulty::Hard, 1), None);
        assert_eq!(book.riddle(Difficulty::Easy, 1), None);
    }

    #[test]
    fn rejects_non_numeric_answers() {
        assert!(PuzzleBook::from_json(r#"{"medium": {"one": []}}"#, 0).is_err());
    }
}
