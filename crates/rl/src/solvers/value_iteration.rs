use gridworld::{Action, Continous, Grid, Policy, State, ValueFunction, ALL_ACTIONS};
use itertools::Itertools;
use rand::prelude::*;
use tracing::debug;

/// Policy optimization via the Bellman optimality backup.
///
/// Every sweep probes the full action alphabet at every state, legality
/// aside: an illegal probe stays put and contributes the stay-put reward
/// plus the discounted self-value.
pub struct ValueIteration {
    grid: Grid,
    gamma: Continous,
    v: ValueFunction,
    policy: Policy,
}

impl ValueIteration {
    /// Seeds an intentionally noisy starting point: each action-state gets
    /// a uniformly random action from the full alphabet (not restricted to
    /// its legal moves) and a value in [0,1). The backup corrects both.
    pub fn new(grid: Grid, gamma: Continous, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut v = ValueFunction::new();
        let mut policy = Policy::new();
        for s in grid.all_states().into_iter().sorted() {
            if grid.is_terminal(&s) {
                v.insert(s, 0.);
            } else {
                policy.insert(s, ALL_ACTIONS[rng.gen_range(0..ALL_ACTIONS.len())]);
                v.insert(s, rng.gen::<Continous>());
            }
        }

        Self {
            grid,
            gamma,
            v,
            policy,
        }
    }

    /// Sweeps `V[s] = max_a (r + gamma * V[next])` until the largest
    /// absolute change drops below `theta`, then replaces the seed policy
    /// with the greedy one. Returns false without deriving a policy when
    /// `max_sweeps` runs out first.
    pub fn exec(&mut self, theta: Continous, max_sweeps: Option<usize>) -> (bool, usize) {
        let states = self.grid.all_states();

        let mut sweeps = 0;
        loop {
            let mut biggest_change: Continous = 0.;
            for s in &states {
                if !self.policy.contains_key(s) {
                    continue;
                }

                let old_v = self.v[s];
                let mut new_v = Continous::NEG_INFINITY;
                for a in ALL_ACTIONS {
                    new_v = new_v.max(self.backup(*s, a));
                }
                self.v.insert(*s, new_v);
                biggest_change = biggest_change.max((old_v - new_v).abs());
            }

            sweeps += 1;
            debug!(sweeps, biggest_change, "value iteration sweep");
            if biggest_change < theta {
                break;
            }
            if max_sweeps.is_some_and(|m| sweeps >= m) {
                return (false, sweeps);
            }
        }

        self.policy = self.greedy_policy();
        (true, sweeps)
    }

    /// The greedy argmax against the current values. Ties break toward the
    /// earliest action in `ALL_ACTIONS` order; re-running this against a
    /// converged value function must reproduce the derived policy.
    pub fn greedy_policy(&mut self) -> Policy {
        let states = self.policy.keys().copied().sorted().collect::<Vec<_>>();

        let mut policy = Policy::new();
        for s in states {
            let mut best_a = ALL_ACTIONS[0];
            let mut best_q = Continous::NEG_INFINITY;
            for a in ALL_ACTIONS {
                let q = self.backup(s, a);
                if q > best_q {
                    best_q = q;
                    best_a = a;
                }
            }
            policy.insert(s, best_a);
        }

        policy
    }

    fn backup(&mut self, s: State, a: Action) -> Continous {
        self.grid.set_state(s);
        let r = self.grid.step(a);
        let next = self.grid.current_state();

        r + self.gamma * self.v.get(&next).copied().unwrap_or(0.)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn v(&self) -> &ValueFunction {
        &self.v
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}
