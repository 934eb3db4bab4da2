//! Tests for sharing decoders across threads.

use schemata::{array, lazy, partial, sync, type_, SyncDecoder};
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;

fn user() -> SyncDecoder<indexmap::IndexMap<String, Value>> {
    type_([
        ("name", sync::string().erase()),
        ("age", sync::number().refine(|n| *n >= 0.0, "NonNegative").erase()),
    ])
}

#[test]
fn test_concurrent_decoding() {
    let decoder = Arc::new(user());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let decoder = Arc::clone(&decoder);
            thread::spawn(move || {
                let result = decoder.decode(&json!({
                    "name": format!("User{}", i),
                    "age": 20 + i
                }));
                assert!(result.is_success());

                let result = decoder.decode(&json!({"name": i, "age": -1}));
                assert_eq!(result.into_result().unwrap_err().len(), 2);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

fn tree() -> SyncDecoder<Value> {
    lazy("Tree", |tree: &SyncDecoder<Value>| {
        partial([("children", array(tree.clone()).erase())]).erase()
    })
}

#[test]
fn test_lazy_forced_from_many_threads() {
    let decoder = tree();
    let input = json!({"children": [{"children": []}, {"children": [{}]}]});

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let decoder = decoder.clone();
            let input = input.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    assert!(decoder.decode(&input).is_success());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_decode_batch_matches_sequential() {
    let decoder = user();
    let inputs: Vec<Value> = (0..256)
        .map(|i| {
            if i % 5 == 0 {
                json!({"name": "x", "age": -i})
            } else {
                json!({"name": format!("user{i}"), "age": i})
            }
        })
        .collect();

    let batch = decoder.decode_batch(&inputs);
    assert_eq!(batch.len(), inputs.len());

    for (input, result) in inputs.iter().zip(batch) {
        assert_eq!(result.into_result(), decoder.decode(input).into_result());
    }
}
