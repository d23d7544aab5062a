pub mod error;
pub mod grid;
pub mod io;
pub mod mdp;
pub mod solver;

pub use error::{Error, Result};
pub use grid::{CellType, Grid};
pub use mdp::{Action, CleaningMdp, RewardConfig, State, StateSpace};
pub use solver::{
    value_iteration, value_iteration_from, value_iteration_with_cancel, Solution, SolverConfig,
};
