pub mod monte_carlo;
pub mod policy_evaluation;
pub mod value_iteration;

use gridworld::{Continous, EpisodeEvent, Policy, State};

/// Convergence threshold used when the caller has no opinion.
pub const DEFAULT_THETA: Continous = 1e-3;

/// Anything that can sample full episodes, one `Vec<EpisodeEvent>` per
/// episode, each beginning with the start state at reward 0.
pub trait EpisodeGenerator {
    fn generate(&mut self, n: usize) -> Vec<Vec<EpisodeEvent>>;
}

/// A hand-specified deterministic policy for the standard grid: the left
/// column climbs toward the +1 exit while the bottom-right corridor walks
/// into the -1 trap, so its value function is easy to eyeball.
pub fn demo_policy() -> Policy {
    use gridworld::Action::{Right, Up};

    Policy::from([
        (State::new(2, 0), Up),
        (State::new(1, 0), Up),
        (State::new(0, 0), Right),
        (State::new(0, 1), Right),
        (State::new(0, 2), Right),
        (State::new(1, 2), Right),
        (State::new(2, 1), Right),
        (State::new(2, 2), Right),
        (State::new(2, 3), Up),
    ])
}
