use thiserror::Error;

/// Errors surfaced by grid construction, state-space generation, and the
/// value-iteration solver. All of them invalidate the solve; there is no
/// local recovery.
#[derive(Debug, Error)]
pub enum Error {
    /// The grid is empty or its rows have unequal lengths.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// A cell symbol does not map to any known cell type.
    #[error("unknown cell type '{symbol}' at row {row}, column {col}")]
    UnknownCellType {
        symbol: char,
        row: usize,
        col: usize,
    },

    /// The grid has more cells than the state-space ceiling allows. The
    /// state count grows as m*n*2^(m*n), so the ceiling is enforced up
    /// front instead of letting enumeration exhaust memory.
    #[error("grid has {cells} cells, exceeding the state-space ceiling of {limit}")]
    GridTooLarge { cells: usize, limit: usize },

    /// The sweep cap was reached before the value function stabilized.
    #[error(
        "value iteration did not converge within {sweeps} sweeps \
         (last delta {delta:.6}, threshold {theta})"
    )]
    Convergence {
        sweeps: usize,
        delta: f64,
        theta: f64,
    },

    /// The caller's cancellation check fired between sweeps.
    #[error("solve cancelled after {sweeps} sweeps")]
    Cancelled { sweeps: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
