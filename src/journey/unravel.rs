//! Dereferencing of index-compacted data.
//!
//! The backing structure is a flat array. Arrays and objects inside it hold
//! integer indices into the same array instead of nested values; scalars are
//! stored inline. [`unravel`] rebuilds the nested value rooted at an index.
//!
//! Negative integers are sentinels for absent values and become `null`.
//!
//! Input is expected to be acyclic. Recursion is bounded by `max_depth`, so
//! a cyclic or pathologically deep structure fails with
//! [`UnravelError::TooDeep`] instead of exhausting the stack. Shared
//! references are copied once per use, so the number of dereferenced nodes
//! is bounded separately by `max_nodes` ([`UnravelError::TooLarge`]).

use std::cell::Cell;

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnravelError {
    #[error("index {index} out of range (structure has {len} entries)")]
    OutOfRange { index: usize, len: usize },

    #[error("expected an integer index, found {0}")]
    NotAnIndex(String),

    #[error("nesting exceeds {0} levels")]
    TooDeep(usize),

    #[error("expansion exceeds {0} nodes")]
    TooLarge(usize),
}

/// Fully resolve `structure[index]`.
pub fn unravel(
    structure: &[Value],
    index: usize,
    max_depth: usize,
    max_nodes: usize,
) -> Result<Value, UnravelError> {
    Unraveler {
        structure,
        max_depth,
        max_nodes,
        visited: Cell::new(0),
    }
    .at(index, 0)
}

struct Unraveler<'a> {
    structure: &'a [Value],
    max_depth: usize,
    max_nodes: usize,
    visited: Cell<usize>,
}

impl Unraveler<'_> {
    fn at(&self, index: usize, depth: usize) -> Result<Value, UnravelError> {
        if depth > self.max_depth {
            return Err(UnravelError::TooDeep(self.max_depth));
        }

        let visited = self.visited.get() + 1;
        if visited > self.max_nodes {
            return Err(UnravelError::TooLarge(self.max_nodes));
        }
        self.visited.set(visited);

        let value = self.structure.get(index).ok_or(UnravelError::OutOfRange {
            index,
            len: self.structure.len(),
        })?;

        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| self.follow(item, depth + 1))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Object(fields) => fields
                .iter()
                .map(|(key, item)| Ok((key.clone(), self.follow(item, depth + 1)?)))
                .collect::<Result<Map<_, _>, _>>()
                .map(Value::Object),
            scalar => Ok(scalar.clone()),
        }
    }

    fn follow(&self, reference: &Value, depth: usize) -> Result<Value, UnravelError> {
        if let Some(index) = reference.as_u64() {
            let index = usize::try_from(index).map_err(|_| UnravelError::OutOfRange {
                index: usize::MAX,
                len: self.structure.len(),
            })?;
            return self.at(index, depth);
        }
        match reference.as_i64() {
            Some(sentinel) if sentinel < 0 => Ok(Value::Null),
            _ => Err(UnravelError::NotAnIndex(reference.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NODES: usize = 1_000;

    fn structure(value: Value) -> Vec<Value> {
        match value {
            Value::Array(items) => items,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_scalars_are_returned_unchanged() {
        let s = structure(json!(["text", 42, true, null]));
        assert_eq!(unravel(&s, 0, 8, NODES).unwrap(), json!("text"));
        assert_eq!(unravel(&s, 1, 8, NODES).unwrap(), json!(42));
        assert_eq!(unravel(&s, 3, 8, NODES).unwrap(), Value::Null);
    }

    #[test]
    fn test_structure_without_indices() {
        let s = structure(json!([[], {}]));
        assert_eq!(unravel(&s, 0, 8, NODES).unwrap(), json!([]));
        assert_eq!(unravel(&s, 1, 8, NODES).unwrap(), json!({}));
    }

    #[test]
    fn test_one_level_of_indirection() {
        let s = structure(json!([{"name": 1, "stops": 2}, "ICE 123", [3, 4], "Berlin", "Hamburg"]));
        assert_eq!(
            unravel(&s, 0, 8, NODES).unwrap(),
            json!({"name": "ICE 123", "stops": ["Berlin", "Hamburg"]})
        );
    }

    #[test]
    fn test_shared_values_are_copied_per_reference() {
        let s = structure(json!([[1, 1], {"code": 2}, "8000105"]));
        assert_eq!(
            unravel(&s, 0, 8, NODES).unwrap(),
            json!([{"code": "8000105"}, {"code": "8000105"}])
        );
    }

    #[test]
    fn test_negative_index_is_null() {
        let s = structure(json!([{"platform": -1}]));
        assert_eq!(unravel(&s, 0, 8, NODES).unwrap(), json!({"platform": null}));
    }

    #[test]
    fn test_out_of_range() {
        let s = structure(json!([[5]]));
        assert_eq!(unravel(&s, 0, 8, NODES), Err(UnravelError::OutOfRange { index: 5, len: 1 }));
        assert_eq!(unravel(&[], 0, 8, NODES), Err(UnravelError::OutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn test_non_integer_reference() {
        let s = structure(json!([["inline"]]));
        assert!(matches!(unravel(&s, 0, 8, NODES), Err(UnravelError::NotAnIndex(_))));
    }

    #[test]
    fn test_cycle_fails_fast() {
        let s = structure(json!([[1], [0]]));
        assert_eq!(unravel(&s, 0, 16, NODES), Err(UnravelError::TooDeep(16)));
    }

    #[test]
    fn test_node_budget_counts_every_dereference() {
        let s = structure(json!([[1, 1], [2, 2], "x"]));
        assert_eq!(unravel(&s, 0, 8, 7).unwrap(), json!([["x", "x"], ["x", "x"]]));
        assert_eq!(unravel(&s, 0, 8, 6), Err(UnravelError::TooLarge(6)));
    }

    #[test]
    fn test_doubling_references_fail_fast() {
        // entry i is [i + 1, i + 1], so a full expansion has 2^41 - 1 nodes
        let mut s: Vec<Value> = (1..=40).map(|i| json!([i, i])).collect();
        s.push(json!("x"));
        assert_eq!(unravel(&s, 0, 64, 100_000), Err(UnravelError::TooLarge(100_000)));
    }
}
