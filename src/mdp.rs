//! The cleaning-robot MDP: states, actions, rewards, and the transition
//! model over a [`Grid`](crate::grid::Grid).

pub mod action;
pub mod model;
pub mod reward;
pub mod state;

// Re-export the MDP building blocks at the area level
pub use action::Action;
pub use model::CleaningMdp;
pub use reward::RewardConfig;
pub use state::{Cleanliness, State, StateSpace, DEFAULT_CELL_LIMIT};
