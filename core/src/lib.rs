//! Board generation, reveal propagation and game state for PySweeper, a
//! minesweeper where numbered cells hide a riddle about their own count.

pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use field::*;
pub use hooks::*;
pub use puzzles::*;
pub use session::*;
pub use state::*;
pub use stats::*;
pub use types::*;

mod cell;
mod config;
mod engine;
mod error;
mod field;
mod hooks;
mod puzzles;
mod session;
mod state;
mod stats;
mod types;

#[cfg(test)]
mod testing;
