//! # Sequence Instances
//!
//! A `SequenceInstance` is the ordered list of items entering the paint shop.
//! Each item carries an opaque type label; labels are interned into dense type
//! ids (in order of first appearance) so that every per-type table elsewhere in
//! the crate is a plain `Vec` indexed by type id.

use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceInstance {
    labels: Vec<String>,
    /// Inverse of `labels`.
    ids: FxHashMap<String, usize>,
    types: Vec<usize>,
    positions: Vec<Vec<usize>>,
}

impl SequenceInstance {
    /// Builds an instance from the label of every position, in sequence order.
    pub fn new<I, S>(sequence: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids: FxHashMap<String, usize> = FxHashMap::default();
        let mut labels = vec![];
        let mut types = vec![];
        let mut positions: Vec<Vec<usize>> = vec![];
        for (p, label) in sequence.into_iter().enumerate() {
            let label = label.as_ref();
            let t = match ids.get(label) {
                Some(&t) => t,
                None => {
                    let t = labels.len();
                    ids.insert(label.to_string(), t);
                    labels.push(label.to_string());
                    positions.push(vec![]);
                    t
                }
            };
            types.push(t);
            positions[t].push(p);
        }
        Self {
            labels,
            ids,
            types,
            positions,
        }
    }

    /// Number of positions `n`.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of distinct types `|T|`.
    pub fn num_types(&self) -> usize {
        self.labels.len()
    }

    /// Type id at position `p`.
    pub fn type_at(&self, p: usize) -> usize {
        self.types[p]
    }

    /// Type ids of all positions, in sequence order.
    pub fn types(&self) -> &[usize] {
        &self.types
    }

    pub fn label(&self, t: usize) -> &str {
        &self.labels[t]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn type_id(&self, label: &str) -> Option<usize> {
        self.ids.get(label).copied()
    }

    /// Positions of type `t`, ascending.
    pub fn positions(&self, t: usize) -> &[usize] {
        &self.positions[t]
    }

    pub fn occurrences(&self, t: usize) -> usize {
        self.positions[t].len()
    }

    /// Labels of every position, in sequence order.
    pub fn sequence(&self) -> impl Iterator<Item = &str> + '_ {
        self.types.iter().map(|&t| self.labels[t].as_str())
    }

    /// True when every type occurs exactly twice (the binary paint-shop case).
    pub fn is_binary(&self) -> bool {
        self.positions.iter().all(|ps| ps.len() == 2)
    }
}

impl Serialize for SequenceInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sequence())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interns_in_first_appearance_order() {
        let inst = SequenceInstance::new(["B", "A", "B", "C", "A"]);
        assert_eq!(inst.len(), 5);
        assert_eq!(inst.num_types(), 3);
        assert_eq!(inst.labels(), &["B", "A", "C"]);
        assert_eq!(inst.types(), &[0, 1, 0, 2, 1]);
        assert_eq!(inst.positions(0), &[0, 2]);
        assert_eq!(inst.positions(1), &[1, 4]);
        assert_eq!(inst.occurrences(2), 1);
        assert_eq!(inst.type_id("C"), Some(2));
        assert_eq!(inst.type_id("D"), None);
        assert!(!inst.is_binary());
    }

    #[test]
    fn type_id_inverts_label() {
        let seq: Vec<String> = (0..2000).map(|i| format!("T{}", i * 7 % 500)).collect();
        let inst = SequenceInstance::new(&seq);
        assert_eq!(inst.num_types(), 500);
        for t in 0..inst.num_types() {
            assert_eq!(inst.type_id(inst.label(t)), Some(t));
        }
        assert_eq!(inst.type_id("T500"), None);
    }

    #[test]
    fn sequence_round_trips_labels() {
        let seq = ["A", "D", "E", "B", "A", "F", "C", "B", "C", "D", "E", "F"];
        let inst = SequenceInstance::new(seq);
        assert!(inst.is_binary());
        assert_eq!(inst.sequence().collect::<Vec<_>>(), seq);
        assert_eq!(
            serde_json::to_string(&inst).unwrap(),
            r#"["A","D","E","B","A","F","C","B","C","D","E","F"]"#
        );
    }

    #[test]
    fn empty_instance() {
        let inst = SequenceInstance::new(Vec::<String>::new());
        assert!(inst.is_empty());
        assert_eq!(inst.num_types(), 0);
        assert!(inst.is_binary());
    }
}
