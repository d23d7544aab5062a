/// Reward constants for the cleaning MDP.
///
/// The defaults are the canonical model: small step cost, a stronger penalty
/// for wasted work (bumping a wall, vacuuming a clean cell), a large bonus
/// for a successful clean, and a pinned terminal value for fully-clean
/// states. Alternate constant sets are expressed by constructing a different
/// `RewardConfig`, not by separate code paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardConfig {
    /// Reward for a movement that changes position. Applies regardless of
    /// the destination cell's cleanliness.
    pub step_cost: f64,
    /// Reward for a movement clamped at the grid boundary (no position
    /// change).
    pub collision_penalty: f64,
    /// Reward for vacuuming a cell that is already clean.
    pub redundant_clean_penalty: f64,
    /// Reward on the success branch of vacuuming a dirty cell.
    pub clean_success_reward: f64,
    /// Reward on the failure branch of vacuuming a dirty cell.
    pub clean_failure_cost: f64,
    /// Pinned value of goal states; never updated by the solver.
    pub terminal_reward: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        RewardConfig {
            step_cost: -1.0,
            collision_penalty: -5.0,
            redundant_clean_penalty: -5.0,
            clean_success_reward: 10.0,
            clean_failure_cost: -1.0,
            terminal_reward: 100.0,
        }
    }
}
