use crate::demand::{DemandError, DemandSpec, TypeDemand, validate};
use crate::instance::SequenceInstance;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A built-in instance. `black == None` means binary demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    pub problem_name: &'static str,
    pub sequence: &'static [&'static str],
    pub black: Option<&'static [(&'static str, i64)]>,
}

impl Problem {
    pub fn instance(&self) -> SequenceInstance {
        SequenceInstance::new(self.sequence)
    }

    pub fn demand_spec(&self) -> DemandSpec {
        match self.black {
            None => DemandSpec::Binary,
            Some(black) => DemandSpec::Explicit(
                black.iter().map(|&(l, b)| (l.to_string(), b)).collect(),
            ),
        }
    }

    pub fn job(&self) -> Result<(SequenceInstance, TypeDemand), DemandError> {
        let instance = self.instance();
        let demand = validate(&instance, &self.demand_spec())?;
        Ok((instance, demand))
    }
}

const PROBLEMS_DATA: &[Problem] = &[
    Problem {
        problem_name: "nested",
        sequence: &["A", "B", "C", "C", "B", "A"],
        black: None,
    },
    Problem {
        problem_name: "binary12",
        sequence: &["A", "D", "E", "B", "A", "F", "C", "B", "C", "D", "E", "F"],
        black: None,
    },
    Problem {
        problem_name: "multi10",
        sequence: &["A", "B", "A", "C", "B", "A", "C", "C", "B", "A"],
        black: Some(&[("A", 2), ("B", 1), ("C", 2)]),
    },
    Problem {
        problem_name: "multi16",
        sequence: &[
            "A", "B", "C", "A", "D", "B", "A", "C", "D", "D", "B", "A", "C", "B", "D", "A",
        ],
        black: Some(&[("A", 3), ("B", 2), ("C", 1), ("D", 2)]),
    },
];

pub fn all_problems() -> &'static [Problem] {
    PROBLEMS_DATA
}

// Build a name -> problem map once for O(1) lookup.
static PROBLEM_MAP: Lazy<HashMap<&'static str, &'static Problem>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for p in PROBLEMS_DATA.iter() {
        m.insert(p.problem_name, p);
    }
    m
});

pub fn get_problem(name: &str) -> Option<&'static Problem> {
    PROBLEM_MAP.get(name).copied()
}
