use std::str::FromStr;

use pysweeper_core::{Coord2, Difficulty, GridSize};

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Answer(Coord2, u8),
    New {
        difficulty: Option<Difficulty>,
        grid: Option<GridSize>,
    },
    Stats,
    ResetStats,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  r ROW COL        reveal a cell (again on a '?' cell to read its riddle)
  f ROW COL        flag or unflag a cell
  a ROW COL N      answer the riddle on a cell
  new [DIFFICULTY] [GRID]
                   start over, e.g. `new hard 16x16`
  stats            show statistics
  reset-stats      clear statistics
  help             show this text
  quit             leave the game";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ParseCommandError {
    #[error("empty command, type `help` for a list")]
    Empty,
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("expected {0}")]
    Arguments(&'static str),
}

fn coords<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Option<Coord2> {
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    Some((row, col))
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        use ParseCommandError::*;

        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(Empty);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(coords(&mut parts).ok_or(Arguments("ROW COL"))?),
            "f" | "flag" => Command::Flag(coords(&mut parts).ok_or(Arguments("ROW COL"))?),
            "a" | "answer" => {
                let pos = coords(&mut parts).ok_or(Arguments("ROW COL N"))?;
                let answer = parts
                    .next()
                    .and_then(|n| n.parse().ok())
                    .ok_or(Arguments("ROW COL N"))?;
                Command::Answer(pos, answer)
            }
            "n" | "new" => {
                let mut difficulty = None;
                let mut grid = None;
                for part in parts.by_ref() {
                    if let Ok(parsed) = part.parse::<Difficulty>() {
                        difficulty = Some(parsed);
                    } else if let Ok(parsed) = part.parse::<GridSize>() {
                        grid = Some(parsed);
                    } else {
                        return Err(Arguments(
                            "a difficulty (easy, medium, hard) or grid (10x10, 16x16, 20x20)",
                        ));
                    }
                }
                Command::New { difficulty, grid }
            }
            "s" | "stats" => Command::Stats,
            "reset-stats" => Command::ResetStats,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => return Err(Unknown(other.into())),
        };

        if parts.next().is_some() {
            return Err(Arguments("no extra arguments"));
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_commands() {
        assert_eq!("r 3 4".parse::<Command>(), Ok(Command::Reveal((3, 4))));
        assert_eq!("F 0 9".parse::<Command>(), Ok(Command::Flag((0, 9))));
        assert_eq!("a 1 2 5".parse::<Command>(), Ok(Command::Answer((1, 2), 5)));
    }

    #[test]
    fn parses_new_game_overrides_in_any_order() {
        assert_eq!(
            "new 20x20 hard".parse::<Command>(),
            Ok(Command::New {
                difficulty: Some(Difficulty::Hard),
                grid: Some(GridSize::Large),
            })
        );
        assert_eq!(
            "new".parse::<Command>(),
            Ok(Command::New {
                difficulty: None,
                grid: None,
            })
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!("r 3".parse::<Command>(), Err(ParseCommandError::Arguments("ROW COL")));
        assert_eq!("r -1 3".parse::<Command>(), Err(ParseCommandError::Arguments("ROW COL")));
        assert_eq!("quit now".parse::<Command>(), Err(ParseCommandError::Arguments("no extra arguments")));
        assert!(matches!("dig 1 1".parse::<Command>(), Err(ParseCommandError::Unknown(_))));
        assert!("new 16x30".parse::<Command>().is_err());
    }
}
