use std::cell::RefCell;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use pysweeper_core::*;
use web_time::Instant;

use command::Command;
use storage::{SharedStats, StatsStore};

mod command;
mod render;
mod storage;

const BUILTIN_PUZZLES: &str = include_str!("../assets/puzzles.json");

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper where numbered cells hide riddles", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// easy, medium or hard; easy turns riddles off
    #[arg(short, long, default_value = "easy")]
    difficulty: Difficulty,

    /// 10x10, 16x16 or 20x20
    #[arg(short, long, default_value = "10x10")]
    grid: GridSize,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<String>,

    /// Where statistics.json is kept
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Riddle file to use instead of the built-in one
    #[arg(long)]
    puzzles: Option<PathBuf>,

    /// Ring the terminal bell on reveals, flags and game end
    #[arg(long)]
    sound: bool,
}

fn parse_seed(seed: &str) -> u64 {
    seed.parse().unwrap_or_else(|_| {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        hasher.finish()
    })
}

struct TerminalBell;

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: SoundCue) -> std::result::Result<(), SinkError> {
        log::trace!("bell for {cue:?}");
        let mut stdout = io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        Ok(())
    }
}

fn load_puzzles(path: Option<&PathBuf>, seed: u64) -> anyhow::Result<PuzzleBook> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => BUILTIN_PUZZLES.to_string(),
    };
    let book = PuzzleBook::from_json(&json, seed).context("parsing riddles")?;
    log::debug!("Loaded {} riddles", book.len());
    Ok(book)
}

/// Catches the session clock up with wall time since the game started.
fn sync_clock(session: &mut GameSession, started: Instant) {
    let wall = u32::try_from(started.elapsed().as_secs()).unwrap_or(u32::MAX);
    while !session.is_finished() && session.elapsed_secs() < wall {
        session.tick();
    }
}

fn report_events(session: &mut GameSession) {
    let puzzles_enabled = session.config().puzzles_enabled();
    for event in session.drain_events() {
        match event {
            GameEvent::PuzzleRequested { coords: (row, col), riddle } => {
                println!("riddle at {row} {col}:\n  {riddle}");
                println!("answer with `a {row} {col} N`");
            }
            GameEvent::Finished(record) => {
                let verdict = if record.won { "You won" } else { "Game over" };
                println!("{verdict} after {}s.", record.elapsed_secs);
                if puzzles_enabled {
                    println!(
                        "Total puzzles solved: {}, correct: {}",
                        record.puzzles.attempted, record.puzzles.correct
                    );
                }
                println!("Type `new` to play again.");
            }
            other => log::trace!("{other:?}"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args
        .seed
        .as_deref()
        .map_or_else(rand::random, parse_seed);
    log::debug!("seed: {seed}");

    let stats = Rc::new(RefCell::new(StatsStore::open(args.data_dir.clone())?));
    let mut collaborators = Collaborators::default()
        .with_puzzles(load_puzzles(args.puzzles.as_ref(), seed)?)
        .with_statistics(SharedStats(stats.clone()));
    if args.sound {
        collaborators = collaborators.with_audio(TerminalBell);
    }

    let config = GameConfig::new(args.difficulty, args.grid);
    let mut session = GameSession::start(config, seed, collaborators)?;
    let mut started = Instant::now();

    println!("{}", command::HELP);
    println!("Start on the S tile, it has no mines around it.\n");
    print!("{}", render::board(&session));

    for line in io::stdin().lock().lines() {
        let line = line?;
        sync_clock(&mut session, started);

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        let result = match command {
            Command::Reveal(coords) => session.reveal(coords).map(RevealOutcome::has_update),
            Command::Flag(coords) => session.toggle_flag(coords).map(MarkOutcome::has_update),
            Command::Answer(coords, answer) => session.answer_puzzle(coords, answer).map(|()| true),
            Command::New { difficulty, grid } => {
                session = session.restart(NewGame {
                    difficulty,
                    grid,
                    seed: rand::random(),
                })?;
                started = Instant::now();
                Ok(true)
            }
            Command::Stats => {
                print!("{}", render::statistics(stats.borrow().table()));
                continue;
            }
            Command::ResetStats => {
                stats.borrow_mut().reset()?;
                println!("All statistics have been reset.");
                continue;
            }
            Command::Help => {
                println!("{}", command::HELP);
                continue;
            }
            Command::Quit => break,
        };

        let redraw = result.unwrap_or_else(|err| {
            println!("{err}");
            false
        });
        report_events(&mut session);
        if redraw {
            print!("{}", render::board(&session));
        }
    }

    Ok(())
}
