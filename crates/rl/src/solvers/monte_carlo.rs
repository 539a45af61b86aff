use crate::solvers::EpisodeGenerator;
use gridworld::{Continous, EpisodeEvent, Grid, Policy, State, ValueFunction};
use itertools::Itertools;
use rand::prelude::*;
use std::collections::HashMap;

/// Truncation guard for policies that never reach a terminal state.
pub const MAX_EPISODE_STEPS: usize = 1_000;

/// Samples episodes from a grid by following a fixed policy from a
/// uniformly random start among the action-states. Random starts matter: a
/// deterministic policy would otherwise never visit the states it routes
/// away from, and their values still need estimating.
pub struct GridEpisodes {
    grid: Grid,
    policy: Policy,
    starts: Vec<State>,
    rng: StdRng,
}

impl GridEpisodes {
    pub fn new(grid: Grid, policy: Policy, seed: u64) -> Self {
        // sorted so a fixed seed picks the same starts regardless of map order
        let starts = grid.non_terminal_states().into_iter().sorted().collect();

        Self {
            grid,
            policy,
            starts,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn play(&mut self) -> Vec<EpisodeEvent> {
        let start = self.starts[self.rng.gen_range(0..self.starts.len())];
        self.grid.set_state(start);

        let mut ep = vec![EpisodeEvent { s: start, r: 0. }];
        while !self.grid.game_over() && ep.len() < MAX_EPISODE_STEPS {
            let Some(&a) = self.policy.get(&self.grid.current_state()) else {
                break;
            };
            let r = self.grid.step(a);
            ep.push(EpisodeEvent {
                s: self.grid.current_state(),
                r,
            });
        }

        ep
    }
}

impl EpisodeGenerator for GridEpisodes {
    fn generate(&mut self, n: usize) -> Vec<Vec<EpisodeEvent>> {
        (0..n).map(|_| self.play()).collect()
    }
}

/// First-visit Monte Carlo policy evaluation over `n_ep` sampled episodes.
///
/// Returns are folded backwards from the end of each episode (`g = gamma*g
/// + r[t+1]`), so every visited state is paired with the return accumulated
/// *after* its own transition and the terminal state never receives a
/// sample. Within one episode only the first occurrence of a state
/// contributes.
pub fn mc_first_visit(
    ep_gen: &mut dyn EpisodeGenerator,
    gamma: Continous,
    n_ep: usize,
) -> ValueFunction {
    let mut returns: HashMap<State, Continous> = HashMap::new();
    let mut visits: HashMap<State, usize> = HashMap::new();

    let eps = ep_gen.generate(n_ep);
    for ep in &eps {
        let mut g = 0.;
        for t in (0..ep.len().saturating_sub(1)).rev() {
            g = gamma * g + ep[t + 1].r;
            if is_first_visit(ep, t, &ep[t].s) {
                *returns.entry(ep[t].s).or_insert(0.) += g;
                *visits.entry(ep[t].s).or_insert(0) += 1;
            }
        }
    }

    returns
        .into_iter()
        .map(|(s, r)| (s, r / visits[&s] as Continous))
        .collect()
}

fn is_first_visit(ep: &[EpisodeEvent], t: usize, s: &State) -> bool {
    if t == 0 {
        return true;
    }

    !ep.iter().take(t).any(|e| e.s == *s)
}

/// Evaluates `policy` on `grid` by sampling. Terminal states are pinned at
/// 0; action-states no episode reached stay absent from the result, since
/// "never estimated" must not read as "worth zero".
pub fn evaluate(
    grid: Grid,
    policy: &Policy,
    gamma: Continous,
    n_ep: usize,
    seed: u64,
) -> ValueFunction {
    let terminals: Vec<State> = grid
        .all_states()
        .into_iter()
        .filter(|s| grid.is_terminal(s))
        .collect();

    let mut ep_gen = GridEpisodes::new(grid, policy.clone(), seed);
    let mut v = mc_first_visit(&mut ep_gen, gamma, n_ep);
    for s in terminals {
        v.insert(s, 0.);
    }

    v
}
