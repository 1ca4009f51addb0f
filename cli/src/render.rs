use pysweeper_core::{CellView, GameSession, GameState, StatsTable};

fn cell_symbol(view: CellView) -> &'static str {
    use CellView::*;

    const DIGITS: [&str; 9] = [" . ", " 1 ", " 2 ", " 3 ", " 4 ", " 5 ", " 6 ", " 7 ", " 8 "];
    const ANSWERS: [&str; 9] = ["(0)", "(1)", "(2)", "(3)", "(4)", "(5)", "(6)", "(7)", "(8)"];

    match view {
        Hidden => " # ",
        Flagged => " F ",
        Revealed(count) => DIGITS[usize::from(count.min(8))],
        PuzzlePending => " ? ",
        PuzzleAnswered(answer) => ANSWERS[usize::from(answer.min(8))],
        TriggeredMine => "[*]",
        Mine => " * ",
    }
}

/// Draws the status line and the board, with the safe tile marked before the first move.
pub fn board(session: &GameSession) -> String {
    let status = match session.state() {
        GameState::InProgress => "playing",
        GameState::Won => "you won!",
        GameState::Lost => "game over",
    };
    let config = session.config();
    let mut out = format!(
        "{} {}  mines: {}  time: {}s  {}\n",
        config.difficulty,
        config.grid,
        session.flags_left(),
        session.elapsed_secs(),
        status
    );

    let size = session.size();
    let untouched = session
        .field()
        .iter()
        .all(|(_, cell)| !cell.is_revealed() && !cell.is_flagged());

    out.push_str("    ");
    for col in 0..size {
        out.push_str(&format!("{col:^3}"));
    }
    out.push('\n');

    for row in 0..size {
        out.push_str(&format!("{row:>3} "));
        for col in 0..size {
            let coords = (row, col);
            if untouched && session.safe_tile() == Some(coords) {
                out.push_str(" S ");
                continue;
            }
            match session.view_at(coords) {
                Ok(view) => out.push_str(cell_symbol(view)),
                Err(_) => out.push_str("   "),
            }
        }
        out.push('\n');
    }
    out
}

pub fn statistics(table: &StatsTable) -> String {
    let mut out = format!(
        "{:<16}{:>8}{:>8}{:>8}{:>10}{:>10}\n",
        "", "games", "wins", "losses", "best", "win %"
    );
    for (grid, difficulty, stats) in table.iter() {
        let best = stats
            .best_time
            .map_or_else(|| "-".to_string(), |secs| format!("{secs}s"));
        out.push_str(&format!(
            "{:<16}{:>8}{:>8}{:>8}{:>10}{:>9.2}%\n",
            format!("{grid} / {difficulty}"),
            stats.games_played,
            stats.wins,
            stats.losses,
            best,
            stats.win_loss_ratio
        ));
    }
    out
}
