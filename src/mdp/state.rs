//! Joint position-and-cleanliness states and their exhaustive enumeration.
//!
//! A state pairs the robot's position with one binary cleanliness flag per
//! grid cell, so an `m x n` grid has exactly `m*n*2^(m*n)` states. That
//! exponential blowup is inherent to the problem; the generator enforces a
//! cell-count ceiling up front rather than letting enumeration grow without
//! bound.

use std::collections::HashMap;
use std::fmt;

use bitvec::prelude::*;
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::grid::Grid;

/// Per-cell cleanliness flags in row-major order; a set bit means clean.
pub type Cleanliness = BitVec<u8, Lsb0>;

/// Default ceiling on grid cell count accepted by [`StateSpace::generate`].
/// Twelve cells already enumerate 12 * 2^12 = 49_152 states.
pub const DEFAULT_CELL_LIMIT: usize = 12;

/// Warn once the enumerated space crosses this many states.
const LARGE_SPACE_WARNING: usize = 100_000;

/// Upper bound on the ceiling itself: past this the mask arithmetic and the
/// allocation are both hopeless, whatever the caller asked for.
const MAX_ENUMERABLE_CELLS: usize = 24;

/// One MDP state: robot position plus the cleanliness of every cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    pub row: usize,
    pub col: usize,
    pub cleanliness: Cleanliness,
}

impl State {
    /// True when every cell is clean. Goal states are absorbing: the solver
    /// pins their value and never backs them up.
    pub fn is_goal(&self) -> bool {
        self.cleanliness.all()
    }

    /// Cleanliness of the cell at row-major index `cell`.
    pub fn cell_clean(&self, cell: usize) -> bool {
        self.cleanliness[cell]
    }

    /// Copy of this state with the cell at row-major index `cell` marked
    /// clean.
    pub fn with_cell_cleaned(&self, cell: usize) -> State {
        let mut cleaned = self.clone();
        cleaned.cleanliness.set(cell, true);
        cleaned
    }
}

/// Renders as `x<row>y<col>` followed by one `c`/`d` per cell, the format
/// the solution dump uses.
impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}y{}", self.row, self.col)?;
        for cell in 0..self.cleanliness.len() {
            f.write_str(if self.cleanliness[cell] { "c" } else { "d" })?;
        }
        Ok(())
    }
}

/// The fully enumerated state space of a grid, in a deterministic order:
/// position-major (row, then column), then cleanliness mask in increasing
/// numeric order, where bit `i` of the mask is the cleanliness of cell `i`.
///
/// The enumeration order is semantically irrelevant but kept stable so value
/// and policy dumps are reproducible across runs.
#[derive(Debug, Clone)]
pub struct StateSpace {
    states: Vec<State>,
    index: HashMap<State, usize>,
    rows: usize,
    cols: usize,
}

impl StateSpace {
    /// Enumerates every state of `grid`, rejecting grids above the default
    /// cell-count ceiling.
    pub fn generate(grid: &Grid) -> Result<Self> {
        Self::generate_with_limit(grid, DEFAULT_CELL_LIMIT)
    }

    /// Enumerates every state of `grid`, rejecting grids with more than
    /// `cell_limit` cells with [`Error::GridTooLarge`]. Ceilings above 24
    /// cells are clamped; no machine enumerates past that anyway.
    pub fn generate_with_limit(grid: &Grid, cell_limit: usize) -> Result<Self> {
        let cells = grid.cell_count();
        if cells == 0 {
            return Err(Error::InvalidGrid("grid has no cells".to_string()));
        }
        let limit = cell_limit.min(MAX_ENUMERABLE_CELLS);
        if cells > limit {
            return Err(Error::GridTooLarge { cells, limit });
        }

        let masks = 1usize << cells;
        let total = cells * masks;
        if total > LARGE_SPACE_WARNING {
            warn!(
                "enumerating {} states for a {}x{} grid; expect a slow solve",
                total,
                grid.rows(),
                grid.cols()
            );
        }

        let mut states = Vec::with_capacity(total);
        let mut index = HashMap::with_capacity(total);
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                for mask in 0..masks {
                    let mut cleanliness: Cleanliness = BitVec::repeat(false, cells);
                    for cell in 0..cells {
                        if mask & (1 << cell) != 0 {
                            cleanliness.set(cell, true);
                        }
                    }
                    let state = State {
                        row,
                        col,
                        cleanliness,
                    };
                    index.insert(state.clone(), states.len());
                    states.push(state);
                }
            }
        }
        debug!(
            "enumerated {} states for a {}x{} grid",
            states.len(),
            grid.rows(),
            grid.cols()
        );

        Ok(StateSpace {
            states,
            index,
            rows: grid.rows(),
            cols: grid.cols(),
        })
    }

    /// States in enumeration order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Enumeration-order index of `state`, or `None` if it does not belong
    /// to this space.
    pub fn index_of(&self, state: &State) -> Option<usize> {
        self.index.get(state).copied()
    }

    /// Total number of states, `rows * cols * 2^(rows * cols)`.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Iterator over the goal states (all-clean vector, one per position).
    pub fn goal_states(&self) -> impl Iterator<Item = &State> {
        self.states.iter().filter(|state| state.is_goal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space_2x2() -> StateSpace {
        let grid = Grid::from_symbols(&["vt", "Tv"]).unwrap();
        StateSpace::generate(&grid).unwrap()
    }

    #[test]
    fn state_count_is_mn_times_two_to_the_mn() {
        // 2x2 grid: 4 positions * 2^4 cleanliness vectors.
        let space = space_2x2();
        assert_eq!(space.len(), 4 * 16);

        let grid = Grid::from_symbols(&["vvv"]).unwrap();
        let space = StateSpace::generate(&grid).unwrap();
        assert_eq!(space.len(), 3 * 8);
    }

    #[test]
    fn one_goal_state_per_position() {
        let space = space_2x2();
        assert_eq!(space.goal_states().count(), 4);
        for goal in space.goal_states() {
            assert!(goal.cleanliness.all());
        }
    }

    #[test]
    fn enumeration_is_stable() {
        let grid = Grid::from_symbols(&["vt", "Tv"]).unwrap();
        let first = StateSpace::generate(&grid).unwrap();
        let second = StateSpace::generate(&grid).unwrap();
        assert_eq!(first.states(), second.states());
    }

    #[test]
    fn index_agrees_with_enumeration() {
        let space = space_2x2();
        for (i, state) in space.states().iter().enumerate() {
            assert_eq!(space.index_of(state), Some(i));
        }
    }

    #[test]
    fn rejects_grid_above_cell_limit() {
        let grid = Grid::from_symbols(&["vv", "vv"]).unwrap();
        let err = StateSpace::generate_with_limit(&grid, 3).unwrap_err();
        assert!(matches!(
            err,
            Error::GridTooLarge { cells: 4, limit: 3 }
        ));
    }

    #[test]
    fn display_encodes_position_and_cleanliness() {
        let space = space_2x2();
        // Mask 0b0101: cells 0 and 2 clean, row-major.
        let state = space
            .states()
            .iter()
            .find(|s| {
                s.row == 1
                    && s.col == 0
                    && s.cell_clean(0)
                    && !s.cell_clean(1)
                    && s.cell_clean(2)
                    && !s.cell_clean(3)
            })
            .unwrap();
        assert_eq!(state.to_string(), "x1y0cdcd");
    }

    #[test]
    fn with_cell_cleaned_leaves_original_untouched() {
        let space = space_2x2();
        let dirty = &space.states()[0];
        assert!(!dirty.cell_clean(2));
        let cleaned = dirty.with_cell_cleaned(2);
        assert!(cleaned.cell_clean(2));
        assert!(!dirty.cell_clean(2));
    }
}
