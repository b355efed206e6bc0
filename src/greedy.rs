//! # Greedy Assignor
//!
//! Single left-to-right pass that keeps painting the current color while the
//! current type still has capacity for it, and flips otherwise.
//!
//! Optimal when every type occurs twice with one-white/one-black demand. With
//! larger demands it may be far from optimal; it never looks ahead or
//! backtracks, and that is the expected behavior of this heuristic.

use crate::demand::{DemandError, TypeDemand};
use crate::evaluate::{Color, ColorAssignment};
use crate::instance::SequenceInstance;

/// Colors `instance` greedily, starting with white.
///
/// `demand` must have been validated against `instance`; otherwise the pass may
/// run out of both colors for some type and fail with
/// [`DemandError::ExhaustedCapacity`].
pub fn assign(
    instance: &SequenceInstance,
    demand: &TypeDemand,
) -> Result<ColorAssignment, DemandError> {
    // remaining[t][color]; a type the demand does not know has no capacity
    let mut remaining: Vec<[usize; 2]> = (0..instance.num_types())
        .map(|t| {
            [
                demand.white_counts().get(t).copied().unwrap_or(0),
                demand.black_counts().get(t).copied().unwrap_or(0),
            ]
        })
        .collect();
    let mut current = Color::White;
    let mut colors = Vec::with_capacity(instance.len());
    for (p, &t) in instance.types().iter().enumerate() {
        if remaining[t][current.index()] == 0 {
            current = current.flip();
            if remaining[t][current.index()] == 0 {
                return Err(DemandError::ExhaustedCapacity {
                    label: instance.label(t).to_string(),
                    position: p,
                });
            }
        }
        remaining[t][current.index()] -= 1;
        colors.push(current);
    }
    Ok(ColorAssignment(colors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::{DemandSpec, validate};
    use crate::evaluate::{black_counts, switches};
    use crate::generate;
    use crate::solver::{ConstrainedSolver, Exhaustive};

    const BINARY12: [&str; 12] = ["A", "D", "E", "B", "A", "F", "C", "B", "C", "D", "E", "F"];

    #[test]
    fn binary12_takes_four_switches() {
        let inst = SequenceInstance::new(BINARY12);
        let demand = validate(&inst, &DemandSpec::Binary).unwrap();
        let a = assign(&inst, &demand).unwrap();
        assert_eq!(a.to_string(), "WWWWBBBBWBBW");
        assert_eq!(switches(&a), 4);
    }

    #[test]
    fn empty_instance_gives_empty_coloring() {
        let inst = SequenceInstance::new(Vec::<&str>::new());
        let demand = validate(&inst, &DemandSpec::Binary).unwrap();
        assert!(assign(&inst, &demand).unwrap().is_empty());
    }

    #[test]
    fn conserves_demand_on_random_instances() {
        for seed in 0..50 {
            let (inst, spec) = generate::random_multi(40, 6, Some(seed));
            let demand = validate(&inst, &spec).unwrap();
            let a = assign(&inst, &demand).unwrap();
            assert_eq!(a.len(), inst.len());
            assert_eq!(black_counts(&inst, &a), demand.black_counts(), "seed {}", seed);
        }
    }

    #[test]
    fn never_beats_the_exhaustive_optimum() {
        let solver = Exhaustive::default();
        for seed in 0..20 {
            let inst = generate::random_binary(6, Some(seed));
            let demand = validate(&inst, &DemandSpec::Binary).unwrap();
            let a = assign(&inst, &demand).unwrap();
            let system = crate::formulation::build(&inst, &demand).unwrap();
            let best = solver.solve(&system).unwrap();
            let optimum = best.objective.unwrap();
            assert!(
                switches(&a) as f64 >= optimum,
                "seed {}: {}",
                seed,
                inst.sequence().collect::<String>()
            );
        }
    }

    #[test]
    fn binary12_gap_to_optimum() {
        let inst = SequenceInstance::new(BINARY12);
        let demand = validate(&inst, &DemandSpec::Binary).unwrap();
        let system = crate::formulation::build(&inst, &demand).unwrap();
        let best = Exhaustive::default().solve(&system).unwrap();
        assert_eq!(best.objective, Some(2.0));
        assert_eq!(switches(&assign(&inst, &demand).unwrap()), 4);
    }

    #[test]
    fn single_block_per_color_when_types_are_nested() {
        // A B C C B A: one switch, which is optimal.
        let inst = SequenceInstance::new(["A", "B", "C", "C", "B", "A"]);
        let demand = validate(&inst, &DemandSpec::Binary).unwrap();
        let a = assign(&inst, &demand).unwrap();
        assert_eq!(a.to_string(), "WWWBBB");
        assert_eq!(switches(&a), 1);
    }

    #[test]
    fn exhausted_capacity_on_unvalidated_demand() {
        let inst = SequenceInstance::new(["A", "A", "A"]);
        let demand = validate(&SequenceInstance::new(["A", "A"]), &DemandSpec::Binary).unwrap();
        let err = assign(&inst, &demand).unwrap_err();
        assert_eq!(
            err,
            DemandError::ExhaustedCapacity {
                label: "A".to_string(),
                position: 2,
            }
        );
    }

    #[test]
    fn exhausted_capacity_on_demand_for_fewer_types() {
        let inst = SequenceInstance::new(["A", "B", "A", "B"]);
        let demand = validate(&SequenceInstance::new(["A", "A"]), &DemandSpec::Binary).unwrap();
        let err = assign(&inst, &demand).unwrap_err();
        assert_eq!(
            err,
            DemandError::ExhaustedCapacity {
                label: "B".to_string(),
                position: 1,
            }
        );
    }
}
