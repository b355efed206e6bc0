//! # Switch-Count Evaluation
//!
//! Colorings and the objective they are judged by. The same functions score
//! greedy output and assignments returned by external solvers, so the numbers
//! are directly comparable.

use crate::demand::TypeDemand;
use crate::formulation::FormulationError;
use crate::instance::SequenceInstance;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn flip(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Binary value: 1 for black.
    pub fn bit(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    pub fn from_bit(b: u8) -> Self {
        if b == 0 { Color::White } else { Color::Black }
    }

    pub(crate) fn index(self) -> usize {
        self.bit() as usize
    }
}

/// One color per position of a `SequenceInstance`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColorAssignment(pub Vec<Color>);

impl ColorAssignment {
    pub fn from_bits(bits: &[u8]) -> Self {
        Self(bits.iter().map(|&b| Color::from_bit(b)).collect())
    }

    /// Reads the low `n` bits of `mask`, bit `i` giving position `i`.
    pub fn from_mask(mask: u64, n: usize) -> Self {
        Self((0..n).map(|i| Color::from_bit((mask >> i & 1) as u8)).collect())
    }

    pub fn to_bits(&self) -> Vec<u8> {
        self.0.iter().map(|c| c.bit()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }
}

impl fmt::Display for ColorAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0 {
            f.write_str(match c {
                Color::White => "W",
                Color::Black => "B",
            })?;
        }
        Ok(())
    }
}

/// Number of positions `p >= 1` whose color differs from position `p - 1`.
pub fn switches(assignment: &ColorAssignment) -> usize {
    assignment.0.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Same as [`switches`] over a raw 0/1 vector.
pub fn switches_bits(bits: &[u8]) -> usize {
    bits.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Number of black positions per type id.
pub fn black_counts(instance: &SequenceInstance, assignment: &ColorAssignment) -> Vec<usize> {
    let mut cnt = vec![0; instance.num_types()];
    for (&t, &c) in instance.types().iter().zip(&assignment.0) {
        if c == Color::Black {
            cnt[t] += 1;
        }
    }
    cnt
}

/// A type whose black count differs from its demand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub label: String,
    pub required_black: usize,
    pub actual_black: usize,
}

impl Violation {
    /// Signed violation amount `actual - required`.
    pub fn amount(&self) -> i64 {
        self.actual_black as i64 - self.required_black as i64
    }
}

pub fn violations(
    instance: &SequenceInstance,
    demand: &TypeDemand,
    assignment: &ColorAssignment,
) -> Vec<Violation> {
    let required = demand.black_counts();
    black_counts(instance, assignment)
        .into_iter()
        .enumerate()
        .filter_map(|(t, b)| {
            let r = required.get(t).copied().unwrap_or(0);
            (b != r).then(|| Violation {
                label: instance.label(t).to_string(),
                required_black: r,
                actual_black: b,
            })
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Score {
    pub switches: usize,
    pub violations: Vec<Violation>,
}

impl Score {
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Scores any assignment for `instance`, e.g. one returned by an external solver.
pub fn score(
    instance: &SequenceInstance,
    demand: &TypeDemand,
    assignment: &ColorAssignment,
) -> Result<Score, FormulationError> {
    if assignment.len() != instance.len() {
        return Err(FormulationError::AssignmentLength {
            expected: instance.len(),
            actual: assignment.len(),
        });
    }
    Ok(Score {
        switches: switches(assignment),
        violations: violations(instance, demand, assignment),
    })
}
