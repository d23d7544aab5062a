//! The cleaning grid: a rectangular array of floor cells, each with a fixed
//! probability that one vacuum pass actually cleans it.

use crate::error::{Error, Result};

/// Floor type of a single cell, determining how likely a vacuum pass is to
/// succeed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    /// Plain flooring, symbol `v`. Cleaning succeeds with probability 0.95.
    Ordinary,
    /// Textured flooring, symbol `t`. Cleaning succeeds with probability 0.85.
    Textured,
    /// Heavily textured flooring, symbol `T`. Cleaning succeeds with
    /// probability 0.75.
    HeavilyTextured,
}

impl CellType {
    /// Maps a grid-file symbol to a cell type, or `None` for an unknown
    /// symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'v' => Some(CellType::Ordinary),
            't' => Some(CellType::Textured),
            'T' => Some(CellType::HeavilyTextured),
            _ => None,
        }
    }

    /// The symbol this cell type is written as in grid files.
    pub fn symbol(&self) -> char {
        match self {
            CellType::Ordinary => 'v',
            CellType::Textured => 't',
            CellType::HeavilyTextured => 'T',
        }
    }

    /// Probability in (0, 1] that a single vacuum pass cleans a cell of this
    /// type.
    pub fn cleaning_probability(&self) -> f64 {
        match self {
            CellType::Ordinary => 0.95,
            CellType::Textured => 0.85,
            CellType::HeavilyTextured => 0.75,
        }
    }
}

/// An immutable `rows x cols` grid of cell types. Cells are stored in
/// row-major order; `(row, col)` maps to index `row * cols + col`, the same
/// indexing the cleanliness vector of a [`State`](crate::mdp::State) uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellType>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Builds a grid from rows of symbols, one `&str` per grid row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrid`] if there are no rows, any row is
    /// empty, or rows have unequal lengths, and [`Error::UnknownCellType`]
    /// for a symbol with no cell-type mapping.
    pub fn from_symbols<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::InvalidGrid("no rows".to_string()));
        }
        let cols = rows[0].as_ref().chars().count();
        if cols == 0 {
            return Err(Error::InvalidGrid("first row is empty".to_string()));
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.chars().count() != cols {
                return Err(Error::InvalidGrid(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.chars().count(),
                    cols
                )));
            }
            for (col, symbol) in line.chars().enumerate() {
                let cell = CellType::from_symbol(symbol).ok_or(Error::UnknownCellType {
                    symbol,
                    row,
                    col,
                })?;
                cells.push(cell);
            }
        }

        Ok(Grid {
            cells,
            rows: rows.len(),
            cols,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total cell count, `rows * cols`.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Row-major index of `(row, col)`.
    pub fn cell_index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    /// Cell type at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> CellType {
        self.cells[self.cell_index(row, col)]
    }

    /// Cleaning-success probability of the cell at `(row, col)`.
    pub fn cleaning_probability(&self, row: usize, col: usize) -> f64 {
        self.cell(row, col).cleaning_probability()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_cell_types() {
        let grid = Grid::from_symbols(&["vt", "Tv"]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.cell(0, 0), CellType::Ordinary);
        assert_eq!(grid.cell(0, 1), CellType::Textured);
        assert_eq!(grid.cell(1, 0), CellType::HeavilyTextured);
        assert_eq!(grid.cleaning_probability(1, 0), 0.75);
    }

    #[test]
    fn symbol_round_trip() {
        for symbol in ['v', 't', 'T'] {
            let cell = CellType::from_symbol(symbol).unwrap();
            assert_eq!(cell.symbol(), symbol);
            let p = cell.cleaning_probability();
            assert!(p > 0.0 && p <= 1.0);
        }
    }

    #[test]
    fn rejects_empty_grid() {
        let rows: [&str; 0] = [];
        assert!(matches!(
            Grid::from_symbols(&rows),
            Err(Error::InvalidGrid(_))
        ));
        assert!(matches!(
            Grid::from_symbols(&[""]),
            Err(Error::InvalidGrid(_))
        ));
    }

    #[test]
    fn rejects_ragged_rows() {
        assert!(matches!(
            Grid::from_symbols(&["vv", "v"]),
            Err(Error::InvalidGrid(_))
        ));
    }

    #[test]
    fn rejects_unknown_symbol() {
        let err = Grid::from_symbols(&["vt", "vx"]).unwrap_err();
        match err {
            Error::UnknownCellType { symbol, row, col } => {
                assert_eq!(symbol, 'x');
                assert_eq!(row, 1);
                assert_eq!(col, 1);
            }
            other => panic!("expected UnknownCellType, got {other:?}"),
        }
    }
}
