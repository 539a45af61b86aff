//! Text frames for value functions and policies.
//!
//! Presentation only: a frame is a plain string the host hands to whatever
//! line-oriented sink it logs to. Cells without an entry render blank, so
//! "never estimated" stays visibly distinct from an estimate of zero.

use crate::{Continous, Discrete, Policy, State, ValueFunction};

const VALUE_CELL_WIDTH: usize = 7;
const POLICY_CELL_WIDTH: usize = 6;

/// A `rows` x `cols` grid of fixed-width numbers.
pub fn values_frame(v: &ValueFunction, rows: Discrete, cols: Discrete) -> String {
    frame(rows, cols, VALUE_CELL_WIDTH, |s| {
        v.get(s).map(|x: &Continous| format!("{x:>6.2}|"))
    })
}

/// A `rows` x `cols` grid of action symbols.
pub fn policy_frame(p: &Policy, rows: Discrete, cols: Discrete) -> String {
    frame(rows, cols, POLICY_CELL_WIDTH, |s| {
        p.get(s).map(|a| format!("  {a}  |"))
    })
}

fn frame(
    rows: Discrete,
    cols: Discrete,
    cell_width: usize,
    cell: impl Fn(&State) -> Option<String>,
) -> String {
    let blank = format!("{:>width$}|", "", width = cell_width - 1);
    let separator = "-".repeat(cell_width * cols.max(0) as usize);

    let mut out = String::new();
    for row in 0..rows {
        out.push_str(&separator);
        out.push('\n');
        for col in 0..cols {
            let s = State::new(row, col);
            out.push_str(&cell(&s).unwrap_or_else(|| blank.clone()));
        }
        out.push('\n');
    }

    out
}
