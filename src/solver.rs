//! Synchronous value iteration over the cleaning MDP.
//!
//! Each sweep applies the Bellman optimality backup to every non-goal state
//! using only the previous sweep's value array (Jacobi-style update), then
//! replaces the array whole. Because no backup within a sweep reads another
//! backup's output, the per-state backups are computed in parallel with
//! rayon and collected back in enumeration order, so results are
//! deterministic and independent of sweep order.

use log::debug;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::mdp::{Action, CleaningMdp, StateSpace};

/// Solver configuration with the canonical defaults: discount 0.90,
/// convergence threshold 1e-3, no sweep cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Discount factor, strictly inside (0, 1).
    pub gamma: f64,
    /// Convergence threshold on the maximum per-sweep value change.
    pub theta: f64,
    /// Optional safety cap on sweep count. Value iteration has no proven
    /// iteration bound in general, so an uncapped solve can in principle
    /// run forever; with a cap, exceeding it is [`Error::Convergence`].
    pub max_sweeps: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            gamma: 0.90,
            theta: 1e-3,
            max_sweeps: None,
        }
    }
}

/// Converged value function and greedy policy, indexed in the state space's
/// enumeration order. `policy` is `None` exactly at goal states, which are
/// absorbing and take no action.
#[derive(Debug, Clone)]
pub struct Solution {
    pub values: Vec<f64>,
    pub policy: Vec<Option<Action>>,
    /// Number of sweeps performed before convergence.
    pub sweeps: usize,
}

/// Runs value iteration from a cold start: goal states pinned at the
/// terminal reward, all other values zero.
///
/// # Panics
///
/// Panics if `config.gamma` is not strictly inside (0, 1) or `config.theta`
/// is not positive.
pub fn value_iteration(
    mdp: &CleaningMdp<'_>,
    space: &StateSpace,
    config: &SolverConfig,
) -> Result<Solution> {
    run(mdp, space, config, None, || false)
}

/// Runs value iteration from a warm-start value array in enumeration order.
/// Goal entries are re-pinned to the terminal reward before the first sweep.
/// Warm-starting from an already-converged array converges within one sweep.
///
/// # Panics
///
/// Panics on an invalid `config` or if `initial.len() != space.len()`.
pub fn value_iteration_from(
    mdp: &CleaningMdp<'_>,
    space: &StateSpace,
    config: &SolverConfig,
    initial: Vec<f64>,
) -> Result<Solution> {
    run(mdp, space, config, Some(initial), || false)
}

/// Runs value iteration with a cancellation check invoked between sweeps.
/// When the check returns true the solve stops with [`Error::Cancelled`];
/// this is the escape hatch for the unbounded-loop risk of an uncapped
/// solve.
pub fn value_iteration_with_cancel<F>(
    mdp: &CleaningMdp<'_>,
    space: &StateSpace,
    config: &SolverConfig,
    cancel: F,
) -> Result<Solution>
where
    F: FnMut() -> bool,
{
    run(mdp, space, config, None, cancel)
}

fn run<F>(
    mdp: &CleaningMdp<'_>,
    space: &StateSpace,
    config: &SolverConfig,
    initial: Option<Vec<f64>>,
    mut cancel: F,
) -> Result<Solution>
where
    F: FnMut() -> bool,
{
    assert!(
        config.gamma > 0.0 && config.gamma < 1.0,
        "discount factor gamma must lie strictly inside (0, 1), got {}",
        config.gamma
    );
    assert!(
        config.theta > 0.0,
        "convergence threshold theta must be positive, got {}",
        config.theta
    );

    let terminal = mdp.rewards().terminal_reward;
    let mut values = match initial {
        Some(warm) => {
            assert_eq!(
                warm.len(),
                space.len(),
                "warm-start value array length must equal the state count"
            );
            warm
        }
        None => vec![0.0; space.len()],
    };
    // Goal states keep the pinned terminal value throughout.
    for (i, state) in space.states().iter().enumerate() {
        if state.is_goal() {
            values[i] = terminal;
        }
    }

    let mut policy = vec![None; space.len()];
    let mut sweeps = 0;
    loop {
        if cancel() {
            return Err(Error::Cancelled { sweeps });
        }
        if let Some(cap) = config.max_sweeps {
            if sweeps >= cap {
                let delta = sweep(mdp, space, config, &values).1;
                return Err(Error::Convergence {
                    sweeps,
                    delta,
                    theta: config.theta,
                });
            }
        }

        let (backups, delta) = sweep(mdp, space, config, &values);
        sweeps += 1;
        for (i, (value, action)) in backups.into_iter().enumerate() {
            values[i] = value;
            policy[i] = action;
        }
        debug!("sweep {sweeps}: max delta {delta:.6}");

        if delta < config.theta {
            return Ok(Solution {
                values,
                policy,
                sweeps,
            });
        }
    }
}

/// One Jacobi sweep: backs up every non-goal state against `prev`, returning
/// the new (value, greedy action) per state together with the maximum
/// absolute value change. Goal states pass through untouched.
fn sweep(
    mdp: &CleaningMdp<'_>,
    space: &StateSpace,
    config: &SolverConfig,
    prev: &[f64],
) -> (Vec<(f64, Option<Action>)>, f64) {
    let backups: Vec<(f64, Option<Action>)> = space
        .states()
        .par_iter()
        .enumerate()
        .map(|(i, state)| {
            if state.is_goal() {
                return (prev[i], None);
            }
            let mut best_value = f64::NEG_INFINITY;
            let mut best_action = Action::ALL[0];
            for action in Action::ALL {
                let mut q = 0.0;
                for (next, p) in mdp.transition(state, action) {
                    let j = space
                        .index_of(&next)
                        .expect("transition produced a state outside the state space");
                    q += p * (mdp.reward(state, action, &next) + config.gamma * prev[j]);
                }
                // Strict comparison keeps the first-listed action on ties.
                if q > best_value {
                    best_value = q;
                    best_action = action;
                }
            }
            (best_value, Some(best_action))
        })
        .collect();

    let delta = backups
        .iter()
        .zip(prev)
        .map(|((value, _), old)| (value - old).abs())
        .fold(0.0_f64, f64::max);
    (backups, delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn solve(symbols: &[&str], config: &SolverConfig) -> (StateSpace, Result<Solution>) {
        let grid = Grid::from_symbols(symbols).unwrap();
        let space = StateSpace::generate(&grid).unwrap();
        let mdp = CleaningMdp::new(&grid);
        let solution = value_iteration(&mdp, &space, config);
        (space, solution)
    }

    #[test]
    fn single_cell_grid_end_to_end() {
        let (space, solution) = solve(&["v"], &SolverConfig::default());
        let solution = solution.unwrap();
        assert_eq!(space.len(), 2);

        let dirty = space
            .states()
            .iter()
            .position(|s| !s.is_goal())
            .unwrap();
        let goal = space.states().iter().position(|s| s.is_goal()).unwrap();

        // Retrying the 0.95-probability clean until it lands dominates
        // bumping the walls; the discounted return sits just under the
        // terminal reward.
        assert_eq!(solution.policy[dirty], Some(Action::Vacuum));
        assert!(solution.values[dirty] > 80.0 && solution.values[dirty] < 100.0);
        assert_eq!(solution.values[goal], 100.0);
        assert_eq!(solution.policy[goal], None);
        assert!(solution.sweeps > 0);
    }

    #[test]
    fn goal_values_stay_pinned() {
        let (space, solution) = solve(&["vt", "Tv"], &SolverConfig::default());
        let solution = solution.unwrap();
        for (i, state) in space.states().iter().enumerate() {
            if state.is_goal() {
                assert_eq!(solution.values[i], 100.0);
                assert_eq!(solution.policy[i], None);
            } else {
                assert!(solution.policy[i].is_some());
            }
        }
    }

    #[test]
    fn converged_solve_is_idempotent_under_warm_start() {
        let grid = Grid::from_symbols(&["vt"]).unwrap();
        let space = StateSpace::generate(&grid).unwrap();
        let mdp = CleaningMdp::new(&grid);
        let config = SolverConfig::default();

        let first = value_iteration(&mdp, &space, &config).unwrap();
        let warm = first.values.clone();
        let second = value_iteration_from(&mdp, &space, &config, warm).unwrap();

        assert_eq!(second.sweeps, 1);
        for (a, b) in first.values.iter().zip(&second.values) {
            assert!((a - b).abs() <= config.theta);
        }
        assert_eq!(first.policy, second.policy);
    }

    #[test]
    fn sweep_cap_surfaces_convergence_error() {
        let config = SolverConfig {
            max_sweeps: Some(1),
            ..SolverConfig::default()
        };
        let (_, solution) = solve(&["vt", "Tv"], &config);
        match solution {
            Err(Error::Convergence { sweeps, theta, .. }) => {
                assert_eq!(sweeps, 1);
                assert_eq!(theta, config.theta);
            }
            other => panic!("expected Convergence error, got {other:?}"),
        }
    }

    #[test]
    fn cancellation_fires_between_sweeps() {
        let grid = Grid::from_symbols(&["vt", "Tv"]).unwrap();
        let space = StateSpace::generate(&grid).unwrap();
        let mdp = CleaningMdp::new(&grid);
        let result =
            value_iteration_with_cancel(&mdp, &space, &SolverConfig::default(), || true);
        assert!(matches!(result, Err(Error::Cancelled { sweeps: 0 })));
    }

    #[test]
    fn mixed_grid_converges_and_prefers_cleaning_in_place() {
        let (space, solution) = solve(&["vT"], &SolverConfig::default());
        let solution = solution.unwrap();
        // From any state standing on a dirty cell, vacuuming that cell must
        // beat leaving it for later: the policy never moves off a dirty
        // cell on a two-cell grid.
        for (i, state) in space.states().iter().enumerate() {
            if state.is_goal() {
                continue;
            }
            let here = state.row * space.cols() + state.col;
            if !state.cell_clean(here) {
                assert_eq!(solution.policy[i], Some(Action::Vacuum), "state {state}");
            }
        }
    }

    #[test]
    #[should_panic(expected = "gamma")]
    fn rejects_out_of_range_gamma() {
        let grid = Grid::from_symbols(&["v"]).unwrap();
        let space = StateSpace::generate(&grid).unwrap();
        let mdp = CleaningMdp::new(&grid);
        let config = SolverConfig {
            gamma: 1.0,
            ..SolverConfig::default()
        };
        let _ = value_iteration(&mdp, &space, &config);
    }
}
