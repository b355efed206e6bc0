//! Seams for external solvers.
//!
//! The exact formulation and the QUBO are meant for third-party MIQP solvers and
//! annealers. Those sit behind [`ConstrainedSolver`] and [`QuboSampler`]; the
//! only implementation shipped here is [`Exhaustive`], a brute-force search for
//! small instances used to verify the heuristic and the reductions.

use crate::SetMin;
use crate::evaluate::ColorAssignment;
use crate::formulation::ConstraintSystem;
use crate::qubo::QuboModel;
use rayon::prelude::*;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    Timeout,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub status: SolveStatus,
    pub assignment: Option<ColorAssignment>,
    pub objective: Option<f64>,
}

impl Solution {
    fn without_assignment(status: SolveStatus) -> Self {
        Self {
            status,
            assignment: None,
            objective: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub assignment: ColorAssignment,
    pub energy: f64,
}

/// Returns an assignment satisfying every constraint of the system, or reports
/// that it is infeasible or could not be solved in time.
pub trait ConstrainedSolver {
    fn name(&self) -> &str;
    fn solve(&self, system: &ConstraintSystem) -> anyhow::Result<Solution>;
}

/// Returns binary vectors approximately minimizing a QUBO, best first.
pub trait QuboSampler {
    fn name(&self) -> &str;
    fn sample(&self, model: &QuboModel) -> anyhow::Result<Vec<Sample>>;
}

/// Enumerates all `2^n` vectors. Refuses (with `Timeout`, or no samples)
/// above `max_vars`.
#[derive(Clone, Debug)]
pub struct Exhaustive {
    pub max_vars: usize,
}

impl Default for Exhaustive {
    fn default() -> Self {
        Self { max_vars: 24 }
    }
}

fn bits_of(mask: u64, n: usize) -> Vec<u8> {
    (0..n).map(|i| (mask >> i & 1) as u8).collect()
}

impl ConstrainedSolver for Exhaustive {
    fn name(&self) -> &str {
        "exhaustive"
    }

    fn solve(&self, system: &ConstraintSystem) -> anyhow::Result<Solution> {
        let n = system.num_vars;
        if n > self.max_vars.min(63) {
            return Ok(Solution::without_assignment(SolveStatus::Timeout));
        }
        let best = (0..1u64 << n)
            .into_par_iter()
            .filter_map(|mask| {
                let bits = bits_of(mask, n);
                system
                    .is_feasible(&bits)
                    .then(|| (system.objective_value(&bits) as u64, mask))
            })
            .min();
        Ok(match best {
            Some((obj, mask)) => Solution {
                status: SolveStatus::Optimal,
                assignment: Some(ColorAssignment::from_mask(mask, n)),
                objective: Some(obj as f64),
            },
            None => Solution::without_assignment(SolveStatus::Infeasible),
        })
    }
}

impl QuboSampler for Exhaustive {
    fn name(&self) -> &str {
        "exhaustive"
    }

    fn sample(&self, model: &QuboModel) -> anyhow::Result<Vec<Sample>> {
        let n = model.num_vars();
        if n > self.max_vars.min(63) {
            return Ok(vec![]);
        }
        let (_, masks) = (0..1u64 << n)
            .into_par_iter()
            .fold(
                || (f64::INFINITY, Vec::new()),
                |acc, mask| merge(acc, (model.energy(&bits_of(mask, n)), vec![mask])),
            )
            .reduce(|| (f64::INFINITY, Vec::new()), merge);
        let mut samples = masks
            .into_iter()
            .map(|mask| Sample {
                energy: model.energy(&bits_of(mask, n)),
                assignment: ColorAssignment::from_mask(mask, n),
            })
            .collect::<Vec<_>>();
        samples.sort_by_key(|s| s.assignment.to_bits());
        Ok(samples)
    }
}

/// Keeps every mask that attains the lowest energy.
fn merge(mut a: (f64, Vec<u64>), b: (f64, Vec<u64>)) -> (f64, Vec<u64>) {
    const EPS: f64 = 1e-9;
    if (a.0 - b.0).abs() <= EPS {
        a.1.extend(b.1);
        a
    } else if a.0.setmin(b.0) {
        b
    } else {
        a
    }
}
