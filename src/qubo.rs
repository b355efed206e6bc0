//! # QUBO Reduction
//!
//! Folds the equality constraints of a [`ConstraintSystem`] into its objective:
//!
//! ```text
//! E(x) = sum_{(i,i+1)} (x_i - x_{i+1})^2 + P * sum_t (sum_{i in S_t} x_i - b_t)^2
//! ```
//!
//! Expanded with `x_i^2 = x_i`, every term lands in one upper-triangular
//! coefficient map (diagonal = linear, off-diagonal = quadratic) plus a constant
//! offset `P * sum_t b_t^2`. Keeping the offset makes `E(x)` equal the switch
//! count on every feasible `x`.
//!
//! `P` (the penalty weight) is chosen by the caller. It is sound when it exceeds
//! the largest switch-count reduction obtainable by violating one constraint by
//! one unit; [`penalty_bound`] gives a weight that always satisfies this.

use crate::demand::TypeDemand;
use crate::formulation::{self, ConstraintSystem, FormulationError};
use crate::instance::SequenceInstance;
use crate::mat;
use serde::Serialize;
use std::collections::BTreeMap;

/// Sparse symmetric coefficient matrix over `num_vars` binary variables,
/// stored as its upper triangle.
#[derive(Clone, Debug, PartialEq)]
pub struct QuboModel {
    num_vars: usize,
    offset: f64,
    coefficients: BTreeMap<(usize, usize), f64>,
}

#[derive(Default)]
struct QuboBuilder {
    offset: f64,
    coefficients: BTreeMap<(usize, usize), f64>,
}

impl QuboBuilder {
    fn add(&mut self, i: usize, j: usize, v: f64) {
        *self.coefficients.entry((i.min(j), i.max(j))).or_insert(0.0) += v;
    }

    fn finish(mut self, num_vars: usize) -> QuboModel {
        self.coefficients.retain(|_, v| *v != 0.0);
        QuboModel {
            num_vars,
            offset: self.offset,
            coefficients: self.coefficients,
        }
    }
}

/// Reduces `system` to a QUBO with penalty weight `penalty_weight`.
pub fn reduce(system: &ConstraintSystem, penalty_weight: f64) -> Result<QuboModel, FormulationError> {
    if system.num_vars == 0 {
        return Err(FormulationError::EmptyInstance);
    }
    let mut q = QuboBuilder::default();

    // (x_i - x_j)^2 = x_i + x_j - 2 x_i x_j
    for &(i, j) in &system.objective {
        q.add(i, i, 1.0);
        q.add(j, j, 1.0);
        q.add(i, j, -2.0);
    }

    // P (sum x - b)^2 = P [ sum (1 - 2b) x_i + 2 sum_{i<j} x_i x_j + b^2 ]
    let p = penalty_weight;
    for c in &system.constraints {
        let b = c.rhs as f64;
        for (k, &i) in c.vars.iter().enumerate() {
            q.add(i, i, p * (1.0 - 2.0 * b));
            for &j in &c.vars[k + 1..] {
                q.add(i, j, 2.0 * p);
            }
        }
        q.offset += p * b * b;
    }
    Ok(q.finish(system.num_vars))
}

/// Builds the exact formulation and reduces it in one step.
pub fn from_instance(
    instance: &SequenceInstance,
    demand: &TypeDemand,
    penalty_weight: f64,
) -> Result<QuboModel, FormulationError> {
    reduce(&formulation::build(instance, demand)?, penalty_weight)
}

/// A penalty weight that is always sound: any constraint violation costs at
/// least `n`, while the objective never exceeds `n - 1`.
pub fn penalty_bound(system: &ConstraintSystem) -> f64 {
    system.num_vars as f64
}

impl QuboModel {
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Number of nonzero coefficients.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Coefficient of `x_i x_j`; order of `i` and `j` does not matter.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.coefficients
            .get(&(i.min(j), i.max(j)))
            .copied()
            .unwrap_or(0.0)
    }

    /// Nonzero entries `((i, j), v)` with `i <= j`, row-major.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.coefficients.iter().map(|(&k, &v)| (k, v))
    }

    pub fn energy(&self, bits: &[u8]) -> f64 {
        self.offset
            + self
                .iter()
                .filter(|&((i, j), _)| bits[i] != 0 && bits[j] != 0)
                .map(|(_, v)| v)
                .sum::<f64>()
    }

    /// Dense upper-triangular matrix.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        let mut m = mat![0.0; self.num_vars; self.num_vars];
        for ((i, j), v) in self.iter() {
            m[i][j] = v;
        }
        m
    }

    /// Spin form with `x_i = (1 + s_i) / 2`, `s_i` in `{-1, +1}`.
    pub fn to_ising(&self) -> IsingModel {
        let mut h = vec![0.0; self.num_vars];
        let mut j = BTreeMap::new();
        let mut offset = self.offset;
        for ((a, b), v) in self.iter() {
            if a == b {
                // v x = v/2 + v/2 s
                h[a] += v / 2.0;
                offset += v / 2.0;
            } else {
                // v x_a x_b = v/4 (1 + s_a + s_b + s_a s_b)
                h[a] += v / 4.0;
                h[b] += v / 4.0;
                j.insert((a, b), v / 4.0);
                offset += v / 4.0;
            }
        }
        IsingModel { h, j, offset }
    }

    pub fn to_serialized(&self) -> SerializedQubo {
        SerializedQubo {
            num_vars: self.num_vars,
            offset: self.offset,
            linear: self
                .iter()
                .filter(|&((i, j), _)| i == j)
                .map(|((i, _), v)| LinearTerm { i, value: v })
                .collect(),
            quadratic: self
                .iter()
                .filter(|&((i, j), _)| i != j)
                .map(|((i, j), v)| QuadraticTerm { i, j, value: v })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IsingModel {
    pub h: Vec<f64>,
    pub j: BTreeMap<(usize, usize), f64>,
    pub offset: f64,
}

impl IsingModel {
    pub fn energy(&self, spins: &[i8]) -> f64 {
        self.offset
            + self.h.iter().zip(spins).map(|(&h, &s)| h * s as f64).sum::<f64>()
            + self
                .j
                .iter()
                .map(|(&(a, b), &v)| v * (spins[a] * spins[b]) as f64)
                .sum::<f64>()
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LinearTerm {
    pub i: usize,
    pub value: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct QuadraticTerm {
    pub i: usize,
    pub j: usize,
    pub value: f64,
}

/// JSON shape handed to external QUBO samplers.
#[derive(Clone, Debug, Serialize)]
pub struct SerializedQubo {
    pub num_vars: usize,
    pub offset: f64,
    pub linear: Vec<LinearTerm>,
    pub quadratic: Vec<QuadraticTerm>,
}
