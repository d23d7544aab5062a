//! Transition and reward models of the cleaning MDP.

use crate::grid::Grid;
use crate::mdp::action::Action;
use crate::mdp::reward::RewardConfig;
use crate::mdp::state::State;

/// The MDP over a grid: deterministic clamped movement plus stochastic
/// cleaning. Borrows the grid immutably for the duration of a solve.
#[derive(Debug, Clone)]
pub struct CleaningMdp<'a> {
    grid: &'a Grid,
    rewards: RewardConfig,
}

impl<'a> CleaningMdp<'a> {
    /// Model with the canonical reward constants.
    pub fn new(grid: &'a Grid) -> Self {
        Self::with_rewards(grid, RewardConfig::default())
    }

    pub fn with_rewards(grid: &'a Grid, rewards: RewardConfig) -> Self {
        CleaningMdp { grid, rewards }
    }

    pub fn grid(&self) -> &Grid {
        self.grid
    }

    pub fn rewards(&self) -> &RewardConfig {
        &self.rewards
    }

    /// Probability distribution over successor states of taking `action` in
    /// `state`. The returned probabilities always sum to 1.
    ///
    /// Movement clamps to the grid bounds with no wraparound; a movement
    /// that leaves the position unchanged is the boundary-collision
    /// self-loop `[(state, 1.0)]`. Vacuuming a dirty cell splits on the
    /// cell's cleaning-success probability; vacuuming a clean cell is a
    /// degenerate self-loop whose redundancy the reward model penalizes.
    pub fn transition(&self, state: &State, action: Action) -> Vec<(State, f64)> {
        if action.is_movement() {
            let (row, col) = self.clamped_move(state.row, state.col, action);
            if (row, col) == (state.row, state.col) {
                return vec![(state.clone(), 1.0)];
            }
            let moved = State {
                row,
                col,
                cleanliness: state.cleanliness.clone(),
            };
            return vec![(moved, 1.0)];
        }

        let cell = self.grid.cell_index(state.row, state.col);
        if state.cell_clean(cell) {
            return vec![(state.clone(), 1.0)];
        }
        let p = self.grid.cleaning_probability(state.row, state.col);
        let cleaned = state.with_cell_cleaned(cell);
        if p >= 1.0 {
            return vec![(cleaned, 1.0)];
        }
        vec![(cleaned, p), (state.clone(), 1.0 - p)]
    }

    /// Reward for the specific transition branch `state -> next`. This is a
    /// deterministic function of the sampled outcome, not an independent
    /// stochastic draw.
    pub fn reward(&self, state: &State, action: Action, next: &State) -> f64 {
        let r = &self.rewards;
        if action.is_movement() {
            if (next.row, next.col) == (state.row, state.col) {
                return r.collision_penalty;
            }
            return r.step_cost;
        }

        let cell = self.grid.cell_index(state.row, state.col);
        if state.cell_clean(cell) {
            r.redundant_clean_penalty
        } else if next.cell_clean(cell) {
            r.clean_success_reward
        } else {
            r.clean_failure_cost
        }
    }

    fn clamped_move(&self, row: usize, col: usize, action: Action) -> (usize, usize) {
        match action {
            Action::Up => (row.saturating_sub(1), col),
            Action::Down => ((row + 1).min(self.grid.rows() - 1), col),
            Action::Left => (row, col.saturating_sub(1)),
            Action::Right => (row, (col + 1).min(self.grid.cols() - 1)),
            Action::Vacuum => (row, col),
        }
    }
}
