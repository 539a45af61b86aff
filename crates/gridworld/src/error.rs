//! Error types for grid operations.

use crate::{Action, State};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// Text that could not be resolved into two integer coordinates.
    #[error("cannot parse {input:?} as a state (expected \"row,col\")")]
    InvalidStateFormat { input: String },

    /// An undo landed on a position outside the grid's state set. This is
    /// always a caller bug (unwinding a move that was never legally
    /// applied) and must abort the run.
    #[error("undo of {action} landed on {state}, which is not a grid state")]
    InvariantViolation { action: Action, state: State },
}
