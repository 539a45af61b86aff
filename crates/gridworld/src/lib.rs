pub mod error;
pub mod factory;
pub mod render;

pub use error::GridError;

use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub type Discrete = i32;
pub type Continous = f64;

/// A cell of the grid, keyed structurally. Also the observation type of
/// every solver: value functions and policies are maps over `State`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct State {
    pub row: Discrete,
    pub col: Discrete,
}

impl State {
    pub fn new(row: Discrete, col: Discrete) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl FromStr for State {
    type Err = GridError;

    /// Parses the `"row,col"` form accepted wherever a state crosses a text
    /// boundary (logs, host adapters).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split(',').collect::<Vec<_>>();
        if parts.len() != 2 {
            return Err(GridError::InvalidStateFormat {
                input: s.to_string(),
            });
        }

        let coord = |p: &str| {
            p.trim()
                .parse::<Discrete>()
                .map_err(|_| GridError::InvalidStateFormat {
                    input: s.to_string(),
                })
        };

        Ok(Self::new(coord(parts[0])?, coord(parts[1])?))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

/// The full action alphabet, in tie-break order for greedy argmax.
pub const ALL_ACTIONS: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

impl Action {
    fn delta(self) -> (Discrete, Discrete) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Action::Up => Action::Down,
            Action::Down => Action::Up,
            Action::Left => Action::Right,
            Action::Right => Action::Left,
        }
    }

    fn apply(self, s: State) -> State {
        let (dr, dc) = self.delta();
        State::new(s.row + dr, s.col + dc)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Action::Up => 'U',
            Action::Down => 'D',
            Action::Left => 'L',
            Action::Right => 'R',
        };
        write!(f, "{c}")
    }
}

/// Expected discounted return per state, as produced by the solvers. A
/// missing key means the solver never estimated that state, which is not
/// the same thing as an estimate of zero.
pub type ValueFunction = HashMap<State, Continous>;

/// Chosen action per non-terminal state.
pub type Policy = HashMap<State, Action>;

/// One `(state, arrival reward)` sample of a simulated episode. Episodes
/// start with the start state paired with reward 0.
#[derive(Clone, Debug)]
pub struct EpisodeEvent {
    pub s: State,
    pub r: Continous,
}

/// A finite deterministic MDP over a rectangle of cells.
///
/// `rewards` maps a state to the reward received upon *arriving* there;
/// `actions` maps a state to its legal moves. A state absent from `actions`
/// is terminal. Both tables are partial: a cell may appear in neither
/// (unreachable), either, or both.
///
/// The only mutable piece after construction is `position`, which solvers
/// reset and advance freely while probing.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: Discrete,
    cols: Discrete,
    position: State,
    rewards: HashMap<State, Continous>,
    actions: HashMap<State, Vec<Action>>,
}

impl Grid {
    pub fn new(rows: Discrete, cols: Discrete, start: State) -> Self {
        Self {
            rows,
            cols,
            position: start,
            rewards: HashMap::new(),
            actions: HashMap::new(),
        }
    }

    pub fn set(&mut self, rewards: HashMap<State, Continous>, actions: HashMap<State, Vec<Action>>) {
        self.rewards = rewards;
        self.actions = actions;
    }

    pub fn rows(&self) -> Discrete {
        self.rows
    }

    pub fn cols(&self) -> Discrete {
        self.cols
    }

    pub fn rewards(&self) -> &ValueFunction {
        &self.rewards
    }

    pub fn actions(&self, s: &State) -> Option<&Vec<Action>> {
        self.actions.get(s)
    }

    /// Moves the cursor unconditionally; legality only matters to `step`.
    pub fn set_state(&mut self, s: State) {
        self.position = s;
    }

    pub fn current_state(&self) -> State {
        self.position
    }

    pub fn is_terminal(&self, s: &State) -> bool {
        !self.actions.contains_key(s)
    }

    pub fn game_over(&self) -> bool {
        self.is_terminal(&self.position)
    }

    /// Applies `action` if it is legal at the current position, otherwise
    /// stays put. Either way returns the reward for the resulting position
    /// (0 when the rewards table has no entry), so optimistic probes of the
    /// full alphabet need no legality special-casing.
    pub fn step(&mut self, action: Action) -> Continous {
        if self
            .actions
            .get(&self.position)
            .is_some_and(|legal| legal.contains(&action))
        {
            self.position = action.apply(self.position);
        }

        self.rewards.get(&self.position).copied().unwrap_or(0.)
    }

    /// Applies the exact geometric inverse of `step(action)`, with no
    /// legality re-check: the caller asserts it is unwinding a move that
    /// was legally applied. Landing outside `all_states` means that
    /// assertion was false, and the run must stop.
    pub fn undo_step(&mut self, action: Action) -> Result<State, GridError> {
        self.position = action.inverse().apply(self.position);

        if !self.contains(&self.position) {
            return Err(GridError::InvariantViolation {
                action,
                state: self.position,
            });
        }

        Ok(self.position)
    }

    /// The deduplicated union of the rewards and actions key sets.
    pub fn all_states(&self) -> Vec<State> {
        self.rewards
            .keys()
            .chain(self.actions.keys())
            .copied()
            .unique()
            .collect()
    }

    /// States with at least one legal action.
    pub fn non_terminal_states(&self) -> Vec<State> {
        self.actions.keys().copied().collect()
    }

    fn contains(&self, s: &State) -> bool {
        self.rewards.contains_key(s) || self.actions.contains_key(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2,0", State::new(2, 0))]
    #[case("0, 3", State::new(0, 3))]
    #[case(" 1 , 2 ", State::new(1, 2))]
    fn state_parses_from_row_col_text(#[case] input: &str, #[case] expected: State) {
        assert_eq!(input.parse::<State>().unwrap(), expected);
    }

    #[rstest]
    #[case("2")]
    #[case("2,0,1")]
    #[case("a,b")]
    #[case("")]
    #[case("1;2")]
    fn state_rejects_malformed_text(#[case] input: &str) {
        let err = input.parse::<State>().unwrap_err();
        assert!(matches!(err, GridError::InvalidStateFormat { .. }));
    }

    #[test]
    fn state_round_trips_through_json() {
        let s = State::new(2, 0);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"row":2,"col":0}"#);
        assert_eq!(serde_json::from_str::<State>(&json).unwrap(), s);
    }

    #[test]
    fn inverse_actions_cancel() {
        for a in ALL_ACTIONS {
            let s = State::new(1, 1);
            assert_eq!(a.inverse().apply(a.apply(s)), s);
        }
    }
}
