//! Text I/O around the solver: grid files in, line-oriented solution dumps
//! out.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::mdp::StateSpace;
use crate::solver::Solution;

/// Parses a grid from text: one row per line, one cell symbol per
/// character. Blank lines and trailing carriage returns are ignored.
pub fn parse_grid(text: &str) -> Result<Grid> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();
    if rows.is_empty() {
        return Err(Error::InvalidGrid("input contains no grid rows".to_string()));
    }
    Grid::from_symbols(&rows)
}

/// Reads and parses a grid file.
pub fn read_grid<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let text = std::fs::read_to_string(path)?;
    parse_grid(&text)
}

/// Writes the solution dump: every state's value as `<state> <value>`, then
/// every non-goal state's action as `<state> <action>`, both in the state
/// space's enumeration order. Output-only; nothing in this crate re-parses
/// it.
pub fn write_solution<W: Write>(mut writer: W, space: &StateSpace, solution: &Solution) -> Result<()> {
    for (state, value) in space.states().iter().zip(&solution.values) {
        writeln!(writer, "{state} {value}")?;
    }
    for (state, action) in space.states().iter().zip(&solution.policy) {
        if let Some(action) = action {
            writeln!(writer, "{state} {action}")?;
        }
    }
    Ok(())
}

/// Writes the solution dump to a file.
pub fn save_solution<P: AsRef<Path>>(
    path: P,
    space: &StateSpace,
    solution: &Solution,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_solution(&mut writer, space, solution)?;
    writer.flush()?;
    Ok(())
}
