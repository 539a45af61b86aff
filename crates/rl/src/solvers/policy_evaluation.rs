use gridworld::{Continous, Grid, GridError, Policy, State, ValueFunction};
use tracing::debug;

/// Iterative policy evaluation: synchronous sweeps over the state set with
/// in-place (Gauss-Seidel) updates, for either a uniformly random policy
/// over the legal actions or a fixed policy.
pub struct PolicyEvaluation {
    grid: Grid,
    gamma: Continous,
    policy: Option<Policy>,
    v: ValueFunction,
}

impl PolicyEvaluation {
    /// Evaluates the policy that picks uniformly among the legal actions of
    /// each state.
    pub fn uniform_random(grid: Grid, gamma: Continous) -> Self {
        Self::init(grid, gamma, None)
    }

    /// Evaluates `policy`. States without a policy entry are skipped and
    /// keep their last computed value.
    pub fn fixed(grid: Grid, gamma: Continous, policy: Policy) -> Self {
        Self::init(grid, gamma, Some(policy))
    }

    fn init(grid: Grid, gamma: Continous, policy: Option<Policy>) -> Self {
        let v = grid.all_states().into_iter().map(|s| (s, 0.)).collect();
        Self {
            grid,
            gamma,
            policy,
            v,
        }
    }

    /// Sweeps until the largest absolute value change drops below `theta`,
    /// or `max_sweeps` runs out (returned flag is false in that case).
    pub fn exec(
        &mut self,
        theta: Continous,
        max_sweeps: Option<usize>,
    ) -> Result<(bool, usize), GridError> {
        let states = self.grid.all_states();

        let mut sweeps = 0;
        loop {
            let mut biggest_change: Continous = 0.;
            for s in &states {
                let Some(new_v) = self.backup(s)? else {
                    continue;
                };
                let old_v = self.value_at(*s);
                self.v.insert(*s, new_v);
                biggest_change = biggest_change.max((old_v - new_v).abs());
            }

            sweeps += 1;
            debug!(sweeps, biggest_change, "policy evaluation sweep");
            if biggest_change < theta {
                return Ok((true, sweeps));
            }
            if max_sweeps.is_some_and(|m| sweeps >= m) {
                return Ok((false, sweeps));
            }
        }
    }

    /// One-step lookahead for `s`; `None` when `s` has no value to update
    /// (terminal, or no policy entry in fixed mode).
    fn backup(&mut self, s: &State) -> Result<Option<Continous>, GridError> {
        let Some(legal) = self.grid.actions(s).cloned() else {
            return Ok(None);
        };

        match &self.policy {
            None => {
                let p_a = 1. / legal.len() as Continous;
                let mut acc = 0.;
                self.grid.set_state(*s);
                for a in legal {
                    let r = self.grid.step(a);
                    acc += p_a * (r + self.gamma * self.value_at(self.grid.current_state()));
                    // unwind the probe so the next action starts from s
                    self.grid.undo_step(a)?;
                }
                Ok(Some(acc))
            }
            Some(policy) => {
                let Some(&a) = policy.get(s) else {
                    return Ok(None);
                };
                self.grid.set_state(*s);
                let r = self.grid.step(a);
                Ok(Some(r + self.gamma * self.value_at(self.grid.current_state())))
            }
        }
    }

    fn value_at(&self, s: State) -> Continous {
        self.v.get(&s).copied().unwrap_or(0.)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn v(&self) -> &ValueFunction {
        &self.v
    }
}
