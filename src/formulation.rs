//! # Exact Formulation
//!
//! The paint-shop problem as a constrained quadratic 0/1 program:
//!
//! ```text
//! minimize    sum_{i=0}^{n-2} (x_i - x_{i+1})^2
//! subject to  sum_{i in S_t} x_i = b_t      for every type t
//!             x_i in {0, 1}                 (1 = black)
//! ```
//!
//! For binary variables `(x_i - x_{i+1})^2` is 1 exactly when the pair differs,
//! so the objective equals the switch count. The builder performs no search; the
//! structure is handed to an external solver.

use crate::demand::TypeDemand;
use crate::instance::SequenceInstance;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormulationError {
    #[error("instance has no positions")]
    EmptyInstance,
    #[error("assignment has {actual} entries, expected {expected}")]
    AssignmentLength { expected: usize, actual: usize },
    #[error("demand covers {demand_types} types, instance has {instance_types}")]
    DemandMismatch {
        instance_types: usize,
        demand_types: usize,
    },
}

/// `sum_{i in vars} x_i = rhs` for one type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EqualityConstraint {
    pub type_id: usize,
    pub label: String,
    pub vars: Vec<usize>,
    pub rhs: usize,
}

impl EqualityConstraint {
    /// `sum x_i - rhs` at `bits`.
    pub fn violation(&self, bits: &[u8]) -> i64 {
        self.vars.iter().map(|&i| bits[i] as i64).sum::<i64>() - self.rhs as i64
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConstraintSystem {
    pub num_vars: usize,
    pub constraints: Vec<EqualityConstraint>,
    /// Pairs `(i, i + 1)`, each contributing `(x_i - x_{i+1})^2`.
    pub objective: Vec<(usize, usize)>,
}

/// Builds the constrained program for `instance` under `demand`.
pub fn build(
    instance: &SequenceInstance,
    demand: &TypeDemand,
) -> Result<ConstraintSystem, FormulationError> {
    if instance.is_empty() {
        return Err(FormulationError::EmptyInstance);
    }
    if demand.num_types() != instance.num_types() {
        return Err(FormulationError::DemandMismatch {
            instance_types: instance.num_types(),
            demand_types: demand.num_types(),
        });
    }
    let n = instance.len();
    let constraints = (0..instance.num_types())
        .map(|t| EqualityConstraint {
            type_id: t,
            label: instance.label(t).to_string(),
            vars: instance.positions(t).to_vec(),
            rhs: demand.black(t),
        })
        .collect();
    let objective = (1..n).map(|i| (i - 1, i)).collect();
    Ok(ConstraintSystem {
        num_vars: n,
        constraints,
        objective,
    })
}

impl ConstraintSystem {
    pub fn objective_value(&self, bits: &[u8]) -> f64 {
        self.objective
            .iter()
            .map(|&(i, j)| {
                let d = bits[i] as f64 - bits[j] as f64;
                d * d
            })
            .sum()
    }

    pub fn is_feasible(&self, bits: &[u8]) -> bool {
        bits.len() == self.num_vars && self.constraints.iter().all(|c| c.violation(bits) == 0)
    }

    /// Expanded objective coefficients, keyed `(i, j)` with `i <= j`.
    ///
    /// `(x_i - x_j)^2 = x_i^2 - 2 x_i x_j + x_j^2`; squares are kept as squares
    /// here since LP consumers do not assume binary domains.
    pub fn quadratic_terms(&self) -> BTreeMap<(usize, usize), f64> {
        let mut q = BTreeMap::new();
        for &(i, j) in &self.objective {
            *q.entry((i, i)).or_insert(0.0) += 1.0;
            *q.entry((j, j)).or_insert(0.0) += 1.0;
            *q.entry((i.min(j), i.max(j))).or_insert(0.0) -= 2.0;
        }
        q
    }

    /// CPLEX LP text, readable by most MIQP solvers.
    pub fn to_lp(&self) -> String {
        let mut out = String::new();
        out.push_str("\\ paint shop: minimize adjacent color switches\n");
        out.push_str("Minimize\n obj: ");
        let q = self.quadratic_terms();
        if q.is_empty() {
            out.push_str("0 x0");
        } else {
            // LP quadratic sections are written as [ ... ] / 2.
            let parts: Vec<String> = q
                .iter()
                .map(|(&(i, j), &c)| {
                    if i == j {
                        format!("{} x{} ^ 2", fmt_coef(2.0 * c), i)
                    } else {
                        format!("{} x{} * x{}", fmt_coef(2.0 * c), i, j)
                    }
                })
                .collect();
            out.push_str(&format!("[ {} ] / 2", parts.join(" ").trim_start_matches("+ ")));
        }
        out.push('\n');
        out.push_str("Subject To\n");
        for c in &self.constraints {
            // comments end at the line break, so labels are written escaped
            out.push_str(&format!("\\ type {}\n", c.label.escape_debug()));
            let lhs: Vec<String> = c.vars.iter().map(|i| format!("x{}", i)).collect();
            out.push_str(&format!(" t{}: {} = {}\n", c.type_id, lhs.join(" + "), c.rhs));
        }
        out.push_str("Binary\n");
        for i in 0..self.num_vars {
            out.push_str(&format!(" x{}\n", i));
        }
        out.push_str("End\n");
        out
    }
}

fn fmt_coef(v: f64) -> String {
    let sign = if v < 0.0 { "-" } else { "+" };
    let a = v.abs();
    if (a - a.round()).abs() < 1e-9 {
        format!("{} {}", sign, a.round() as i64)
    } else {
        format!("{} {:.6}", sign, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::{DemandSpec, validate};
    use crate::evaluate::{ColorAssignment, switches};
    use rand::prelude::*;
    use rand_chacha::ChaCha20Rng;

    fn binary(seq: &[&str]) -> (SequenceInstance, TypeDemand) {
        let inst = SequenceInstance::new(seq);
        let demand = validate(&inst, &DemandSpec::Binary).unwrap();
        (inst, demand)
    }

    #[test]
    fn one_constraint_per_type_and_adjacent_objective() {
        let (inst, demand) = binary(&["A", "B", "A", "B"]);
        let sys = build(&inst, &demand).unwrap();
        assert_eq!(sys.num_vars, 4);
        assert_eq!(sys.objective, vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(sys.constraints.len(), 2);
        assert_eq!(sys.constraints[0].vars, vec![0, 2]);
        assert_eq!(sys.constraints[1].vars, vec![1, 3]);
        assert!(sys.constraints.iter().all(|c| c.rhs == 1));
    }

    #[test]
    fn empty_instance_is_rejected() {
        let (inst, demand) = binary(&[]);
        assert_eq!(build(&inst, &demand), Err(FormulationError::EmptyInstance));
    }

    #[test]
    fn demand_for_fewer_types_is_rejected() {
        let inst = SequenceInstance::new(["A", "B", "A", "B"]);
        let (_, demand) = binary(&["A", "A"]);
        assert_eq!(
            build(&inst, &demand),
            Err(FormulationError::DemandMismatch {
                instance_types: 2,
                demand_types: 1,
            })
        );
    }

    #[test]
    fn objective_matches_switch_count() {
        let (inst, demand) = binary(&["A", "D", "E", "B", "A", "F", "C", "B", "C", "D", "E", "F"]);
        let sys = build(&inst, &demand).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..200 {
            let bits: Vec<u8> = (0..sys.num_vars).map(|_| rng.random_range(0..2)).collect();
            assert_eq!(
                sys.objective_value(&bits),
                switches(&ColorAssignment::from_bits(&bits)) as f64
            );
        }
    }

    #[test]
    fn feasibility_follows_demand() {
        let (inst, demand) = binary(&["A", "B", "A", "B"]);
        let sys = build(&inst, &demand).unwrap();
        assert!(sys.is_feasible(&[0, 0, 1, 1]));
        assert!(!sys.is_feasible(&[1, 0, 1, 1]));
        assert!(!sys.is_feasible(&[0, 0, 1]));
        assert_eq!(sys.constraints[0].violation(&[1, 0, 1, 1]), 1);
        assert_eq!(sys.constraints[1].violation(&[1, 0, 1, 0]), -1);
    }

    #[test]
    fn rebuild_is_identical() {
        let (inst, demand) = binary(&["C", "A", "B", "A", "C", "B"]);
        assert_eq!(build(&inst, &demand), build(&inst, &demand));
    }

    #[test]
    fn lp_text() {
        let (inst, demand) = binary(&["A", "B", "A", "B"]);
        let lp = build(&inst, &demand).unwrap().to_lp();
        let expected = "\
\\ paint shop: minimize adjacent color switches
Minimize
 obj: [ 2 x0 ^ 2 - 4 x0 * x1 + 4 x1 ^ 2 - 4 x1 * x2 + 4 x2 ^ 2 - 4 x2 * x3 + 2 x3 ^ 2 ] / 2
Subject To
\\ type A
 t0: x0 + x2 = 1
\\ type B
 t1: x1 + x3 = 1
Binary
 x0
 x1
 x2
 x3
End
";
        assert_eq!(lp, expected);
    }

    #[test]
    fn lp_labels_cannot_break_lines() {
        let (inst, demand) = binary(&["A\nEnd\r", "B", "A\nEnd\r", "B"]);
        let lp = build(&inst, &demand).unwrap().to_lp();
        let plain = build(&binary(&["A", "B", "A", "B"]).0, &demand)
            .unwrap()
            .to_lp();
        assert_eq!(lp.lines().count(), plain.lines().count());
        assert!(lp.contains("\\ type A\\nEnd\\r\n"));
        assert_eq!(lp.lines().filter(|l| l.starts_with("End")).count(), 1);
    }

    #[test]
    fn lp_single_position() {
        let inst = SequenceInstance::new(["A"]);
        let demand = validate(
            &inst,
            &DemandSpec::Explicit([("A".to_string(), 1)].into_iter().collect()),
        )
        .unwrap();
        let lp = build(&inst, &demand).unwrap().to_lp();
        assert!(lp.contains(" obj: 0 x0\n"));
        assert!(lp.contains(" t0: x0 = 1\n"));
    }
}
