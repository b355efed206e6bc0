//! # Random Instance Generation
//!
//! Reproducible random paint-shop instances. The binary generator lays out every
//! type twice and shuffles; the multi-car generator draws types uniformly and
//! then picks a feasible black count for every type that occurs.

use crate::demand::DemandSpec;
use crate::instance::SequenceInstance;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

fn rng_from(seed: Option<u64>) -> rand::rngs::StdRng {
    match seed {
        Some(s) => rand::rngs::StdRng::seed_from_u64(s),
        None => rand::rngs::StdRng::from_os_rng(),
    }
}

/// Spreadsheet-style label for type `t`: A, B, ..., Z, AA, AB, ...
pub fn type_label(mut t: usize) -> String {
    let mut s = vec![];
    loop {
        s.push(b'A' + (t % 26) as u8);
        if t < 26 {
            break;
        }
        t = t / 26 - 1;
    }
    s.reverse();
    String::from_utf8(s).unwrap_or_default()
}

/// A binary paint-shop instance with `n_types` types, each occurring twice.
pub fn random_binary(n_types: usize, seed: Option<u64>) -> SequenceInstance {
    let mut rng = rng_from(seed);
    let mut seq: Vec<usize> = (0..n_types).flat_map(|t| [t, t]).collect();
    seq.shuffle(&mut rng);
    SequenceInstance::new(seq.into_iter().map(type_label))
}

/// A multi-car instance of length `n` over at most `n_types` types, with a
/// random feasible black count for every type that occurs.
pub fn random_multi(n: usize, n_types: usize, seed: Option<u64>) -> (SequenceInstance, DemandSpec) {
    let mut rng = rng_from(seed);
    let seq: Vec<String> = (0..n)
        .map(|_| type_label(rng.random_range(0..n_types.max(1))))
        .collect();
    let inst = SequenceInstance::new(&seq);
    let black: BTreeMap<String, i64> = (0..inst.num_types())
        .map(|t| {
            let b = rng.random_range(0..=inst.occurrences(t));
            (inst.label(t).to_string(), b as i64)
        })
        .collect();
    (inst, DemandSpec::Explicit(black))
}
