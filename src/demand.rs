//! # Demand Model
//!
//! Per-type color demand, validated against the occurrence counts observed in a
//! `SequenceInstance`. A validated `TypeDemand` is immutable and satisfies
//! `white(t) + black(t) == occurrences(t)` for every type.

use crate::instance::SequenceInstance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// How the caller states the demand before validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandSpec {
    /// Every type occurs exactly twice and gets one white and one black.
    Binary,
    /// Requested black count per type label; white is the complement.
    Explicit(BTreeMap<String, i64>),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InfeasibleReason {
    #[error("requested black count {0} is negative")]
    Negative(i64),
    #[error("requested black count {requested} exceeds {occurrences} occurrences")]
    ExceedsOccurrences { requested: i64, occurrences: usize },
    #[error("type appears in the demand but not in the sequence")]
    MissingFromInstance,
    #[error("type appears in the sequence but has no demand")]
    MissingFromDemand,
    #[error("binary demand needs exactly 2 occurrences, found {0}")]
    NotBinary(usize),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DemandError {
    #[error("infeasible demand for type {label:?}: {reason}")]
    Infeasible {
        label: String,
        reason: InfeasibleReason,
    },
    #[error("no remaining capacity for type {label:?} at position {position}")]
    ExhaustedCapacity { label: String, position: usize },
}

impl DemandError {
    fn infeasible(label: &str, reason: InfeasibleReason) -> Self {
        DemandError::Infeasible {
            label: label.to_string(),
            reason,
        }
    }
}

/// Validated white/black counts, indexed by type id of the instance it was
/// validated against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDemand {
    white: Vec<usize>,
    black: Vec<usize>,
}

impl TypeDemand {
    pub fn num_types(&self) -> usize {
        self.black.len()
    }

    pub fn white(&self, t: usize) -> usize {
        self.white[t]
    }

    pub fn black(&self, t: usize) -> usize {
        self.black[t]
    }

    pub fn black_counts(&self) -> &[usize] {
        &self.black
    }

    pub fn white_counts(&self) -> &[usize] {
        &self.white
    }

    /// Re-expresses the demand as an explicit label map, e.g. for serialization.
    pub fn to_spec(&self, instance: &SequenceInstance) -> DemandSpec {
        DemandSpec::Explicit(
            self.black
                .iter()
                .enumerate()
                .map(|(t, &b)| (instance.label(t).to_string(), b as i64))
                .collect(),
        )
    }
}

/// Checks `spec` against the occurrence counts of `instance`.
pub fn validate(instance: &SequenceInstance, spec: &DemandSpec) -> Result<TypeDemand, DemandError> {
    match spec {
        DemandSpec::Binary => validate_binary(instance),
        DemandSpec::Explicit(black) => validate_explicit(instance, black),
    }
}

fn validate_binary(instance: &SequenceInstance) -> Result<TypeDemand, DemandError> {
    for t in 0..instance.num_types() {
        let occ = instance.occurrences(t);
        if occ != 2 {
            return Err(DemandError::infeasible(
                instance.label(t),
                InfeasibleReason::NotBinary(occ),
            ));
        }
    }
    let k = instance.num_types();
    Ok(TypeDemand {
        white: vec![1; k],
        black: vec![1; k],
    })
}

fn validate_explicit(
    instance: &SequenceInstance,
    requested: &BTreeMap<String, i64>,
) -> Result<TypeDemand, DemandError> {
    for label in requested.keys() {
        if instance.type_id(label).is_none() {
            return Err(DemandError::infeasible(
                label,
                InfeasibleReason::MissingFromInstance,
            ));
        }
    }
    let mut white = Vec::with_capacity(instance.num_types());
    let mut black = Vec::with_capacity(instance.num_types());
    for t in 0..instance.num_types() {
        let label = instance.label(t);
        let occ = instance.occurrences(t);
        let b = match requested.get(label) {
            Some(&b) => b,
            None => {
                return Err(DemandError::infeasible(
                    label,
                    InfeasibleReason::MissingFromDemand,
                ));
            }
        };
        if b < 0 {
            return Err(DemandError::infeasible(label, InfeasibleReason::Negative(b)));
        }
        if b as usize > occ {
            return Err(DemandError::infeasible(
                label,
                InfeasibleReason::ExceedsOccurrences {
                    requested: b,
                    occurrences: occ,
                },
            ));
        }
        black.push(b as usize);
        white.push(occ - b as usize);
    }
    Ok(TypeDemand { white, black })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explicit(pairs: &[(&str, i64)]) -> DemandSpec {
        DemandSpec::Explicit(pairs.iter().map(|&(l, b)| (l.to_string(), b)).collect())
    }

    #[test]
    fn explicit_demand_derives_white() {
        let inst = SequenceInstance::new(["A", "B", "A", "A", "B"]);
        let d = validate(&inst, &explicit(&[("A", 2), ("B", 0)])).unwrap();
        assert_eq!(d.black_counts(), &[2, 0]);
        assert_eq!(d.white_counts(), &[1, 2]);
        for t in 0..inst.num_types() {
            assert_eq!(d.white(t) + d.black(t), inst.occurrences(t));
        }
    }

    #[test]
    fn too_many_black_is_infeasible() {
        let inst = SequenceInstance::new(["A", "A", "A"]);
        let err = validate(&inst, &explicit(&[("A", 4)])).unwrap_err();
        assert_eq!(
            err,
            DemandError::Infeasible {
                label: "A".to_string(),
                reason: InfeasibleReason::ExceedsOccurrences {
                    requested: 4,
                    occurrences: 3
                },
            }
        );
    }

    #[test]
    fn negative_black_is_infeasible() {
        let inst = SequenceInstance::new(["A", "A"]);
        let err = validate(&inst, &explicit(&[("A", -1)])).unwrap_err();
        assert!(matches!(
            err,
            DemandError::Infeasible {
                reason: InfeasibleReason::Negative(-1),
                ..
            }
        ));
    }

    #[test]
    fn type_set_mismatch_is_infeasible() {
        let inst = SequenceInstance::new(["A", "B"]);
        let err = validate(&inst, &explicit(&[("A", 1)])).unwrap_err();
        assert!(matches!(
            err,
            DemandError::Infeasible {
                reason: InfeasibleReason::MissingFromDemand,
                ..
            }
        ));
        let err = validate(&inst, &explicit(&[("A", 1), ("B", 0), ("Z", 0)])).unwrap_err();
        assert_eq!(
            err,
            DemandError::Infeasible {
                label: "Z".to_string(),
                reason: InfeasibleReason::MissingFromInstance,
            }
        );
    }

    #[test]
    fn binary_demand_requires_pairs() {
        let inst = SequenceInstance::new(["A", "B", "B", "A"]);
        let d = validate(&inst, &DemandSpec::Binary).unwrap();
        assert_eq!(d.black_counts(), &[1, 1]);
        assert_eq!(d.white_counts(), &[1, 1]);

        let inst = SequenceInstance::new(["A", "B", "B", "A", "A"]);
        let err = validate(&inst, &DemandSpec::Binary).unwrap_err();
        assert!(matches!(
            err,
            DemandError::Infeasible {
                reason: InfeasibleReason::NotBinary(3),
                ..
            }
        ));
    }

    #[test]
    fn to_spec_revalidates_to_same_demand() {
        let inst = SequenceInstance::new(["X", "Y", "X"]);
        let d = validate(&inst, &explicit(&[("X", 1), ("Y", 1)])).unwrap();
        assert_eq!(validate(&inst, &d.to_spec(&inst)).unwrap(), d);
    }

    #[test]
    fn error_messages_name_the_type() {
        let inst = SequenceInstance::new(["A", "A", "A"]);
        let err = validate(&inst, &explicit(&[("A", 4)])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "infeasible demand for type \"A\": requested black count 4 exceeds 3 occurrences"
        );
    }
}
