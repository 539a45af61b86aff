//! Canonical grid layouts.

use crate::{Continous, Grid, State};
use std::collections::HashMap;

use crate::Action::{Down, Left, Right, Up};

pub const DEFAULT_STEP_COST: Continous = -0.1;

/// The 3x4 layout:
///
/// ```text
/// .  .  .  1
/// .  x  . -1
/// s  .  .  .
/// ```
///
/// `x` is a blocked cell, absent from both tables; `s` is the start; the
/// numbers are terminal arrival rewards. Legal actions are grid adjacency
/// minus the boundary and the blocked cell.
pub fn standard_grid() -> Grid {
    let rewards = HashMap::from([(State::new(0, 3), 1.), (State::new(1, 3), -1.)]);

    let actions = HashMap::from([
        (State::new(0, 0), vec![Down, Right]),
        (State::new(0, 1), vec![Left, Right]),
        (State::new(0, 2), vec![Left, Down, Right]),
        (State::new(1, 0), vec![Up, Down]),
        (State::new(1, 2), vec![Up, Down, Right]),
        (State::new(2, 0), vec![Up, Right]),
        (State::new(2, 1), vec![Left, Right]),
        (State::new(2, 2), vec![Left, Right, Up]),
        (State::new(2, 3), vec![Left, Up]),
    ]);

    let mut g = Grid::new(3, 4, State::new(2, 0));
    g.set(rewards, actions);
    g
}

/// Same topology as [`standard_grid`], but every non-terminal cell also
/// charges `step_cost` on arrival, so an optimizing solver prefers short
/// paths over wandering.
pub fn negative_grid(step_cost: Continous) -> Grid {
    let base = standard_grid();

    let mut rewards = base.rewards().clone();
    for s in base.non_terminal_states() {
        rewards.insert(s, step_cost);
    }

    let actions: HashMap<_, _> = base
        .non_terminal_states()
        .into_iter()
        .map(|s| (s, base.actions(&s).cloned().unwrap_or_default()))
        .collect();

    let mut g = Grid::new(base.rows(), base.cols(), base.current_state());
    g.set(rewards, actions);
    g
}
