/// Property-based tests for tree decomposition.
///
/// Random JSON trees are generated with `proptest` and decomposed, checking:
/// - one PathValue per string/bool/number leaf, none for nulls or containers
/// - one diagnostic per null
/// - paths are unique
/// - decomposing the same bytes twice gives the same set of pairs
/// - every leaf value survives with its type (numbers narrowed to f32)
/// - the depth-limited parser builds the same tree serde_json does
use proptest::prelude::*;
use serde_json::{Map, Number, Value};
use std::collections::HashSet;
use tree_decompose::{
    decompose_tree, decompose_tree_with, decompose_value, CollectingSink, DecomposeOptions,
    TypedValue,
};

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_-]{0,12}").unwrap()
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1_000_000i64..1_000_000i64).prop_map(|n| Value::Number(Number::from(n))),
        (-1.0e6f64..1.0e6f64).prop_filter_map("finite", |f| Number::from_f64(f).map(Value::Number)),
        "[a-zA-Z0-9 /\\[\\]]{0,20}".prop_map(Value::String),
    ]
}

/// Trees up to 4 levels deep with at most 6 children per container.
fn arb_tree() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..6).prop_map(|pairs| {
                let mut map = Map::new();
                for (k, v) in pairs {
                    map.insert(k, v);
                }
                Value::Object(map)
            }),
        ]
    })
}

#[derive(Default)]
struct Census {
    leaves: usize,
    nulls: usize,
}

fn census(value: &Value, acc: &mut Census) {
    match value {
        Value::Object(map) => map.values().for_each(|v| census(v, acc)),
        Value::Array(arr) => arr.iter().for_each(|v| census(v, acc)),
        Value::Null => acc.nulls += 1,
        _ => acc.leaves += 1,
    }
}

/// Follow a flattened path back into the tree. Keys are generated without
/// `/` or `[`, so splitting on those is unambiguous here.
fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = root;
    let mut rest = path;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('[') {
            let close = after.find(']')?;
            let idx: usize = after[..close].parse().ok()?;
            node = node.as_array()?.get(idx)?;
            rest = &after[close + 1..];
        } else if let Some(after) = rest.strip_prefix('/') {
            let end = after.find(['/', '[']).unwrap_or(after.len());
            node = node.as_object()?.get(&after[..end])?;
            rest = &after[end..];
        } else {
            return None;
        }
    }
    Some(node)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn one_pair_per_leaf_and_one_diagnostic_per_null(tree in arb_tree()) {
        let mut expected = Census::default();
        census(&tree, &mut expected);

        let mut sink = CollectingSink::new();
        let values = decompose_value(&tree, &DecomposeOptions::default(), &mut sink).unwrap();
        prop_assert_eq!(values.len(), expected.leaves);
        prop_assert_eq!(sink.len(), expected.nulls);
    }

    #[test]
    fn paths_are_unique(tree in arb_tree()) {
        let values = decompose_value(&tree, &DecomposeOptions::default(), &mut ()).unwrap();
        let unique: HashSet<&str> = values.iter().map(|pv| pv.path.as_str()).collect();
        prop_assert_eq!(unique.len(), values.len());
    }

    #[test]
    fn decomposition_is_idempotent(tree in arb_tree()) {
        let bytes = serde_json::to_vec(&tree).unwrap();
        let first = decompose_tree_with(&bytes, &DecomposeOptions::default(), &mut ()).unwrap();
        let second = decompose_tree(&bytes).unwrap();
        let as_set = |v: &[tree_decompose::PathValue]| -> HashSet<(String, String)> {
            v.iter().map(|pv| (pv.path.clone(), pv.value.to_string())).collect()
        };
        prop_assert_eq!(as_set(&first), as_set(&second));
    }

    #[test]
    fn every_pair_points_back_at_its_leaf(tree in arb_tree()) {
        let values = decompose_value(&tree, &DecomposeOptions::default(), &mut ()).unwrap();
        for pv in &values {
            let leaf = lookup(&tree, &pv.path);
            prop_assert!(leaf.is_some(), "path {} not found", pv.path);
            match (leaf.unwrap(), &pv.value) {
                (Value::String(s), TypedValue::String(t)) => {
                    prop_assert_eq!(s, t);
                }
                (Value::Bool(a), TypedValue::Bool(b)) => {
                    prop_assert_eq!(a, b);
                }
                (Value::Number(n), TypedValue::Float(f)) => {
                    prop_assert_eq!(n.as_f64().unwrap() as f32, *f);
                }
                (other, value) => {
                    prop_assert!(false, "{} : {:?} vs {:?}", pv.path, other, value);
                }
            }
        }
    }

    #[test]
    fn parsing_bytes_matches_flattening_the_parsed_tree(tree in arb_tree()) {
        let bytes = serde_json::to_vec(&tree).unwrap();
        let reparsed: Value = serde_json::from_slice(&bytes).unwrap();
        let from_bytes = decompose_tree_with(&bytes, &DecomposeOptions::unbounded(), &mut ()).unwrap();
        let from_tree = decompose_value(&reparsed, &DecomposeOptions::unbounded(), &mut ()).unwrap();
        prop_assert_eq!(from_bytes, from_tree);
    }

    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,64}") {
        let _ = decompose_tree(text.as_bytes());
    }
}
