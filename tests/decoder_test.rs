//! Tests for the immediate decoder combinators.

use indexmap::IndexMap;
use schemata::{
    array, literal, nullable, partial, record, sum, sync, tuple, tuple2, tuple3, type_, DecodeError,
    ErrorNode, Kind, SyncDecoder,
};
use serde_json::{json, Value};
use stillwater::Validation;

fn person() -> SyncDecoder<IndexMap<String, Value>> {
    type_([
        ("name", sync::string().erase()),
        ("age", sync::number().erase()),
    ])
}

#[test]
fn test_type_returns_declared_fields_only() {
    let result = person().decode(&json!({
        "name": "Alice",
        "age": 30,
        "email": "alice@example.com"
    }));

    let decoded = result.into_result().unwrap();
    assert_eq!(decoded.keys().collect::<Vec<_>>(), vec!["name", "age"]);
    assert_eq!(decoded["name"], json!("Alice"));
    assert_eq!(decoded["age"], json!(30));
}

#[test]
fn test_type_missing_field() {
    let result = person().decode(&json!({"name": "a"}));

    if let Validation::Failure(errors) = result {
        assert_eq!(errors.len(), 1);
        match errors.first() {
            ErrorNode::Key { key, kind, errors } => {
                assert_eq!(key, "age");
                assert_eq!(*kind, Kind::Required);
                assert_eq!(errors, &DecodeError::leaf(json!(null), "number"));
            }
            other => panic!("expected key node, got {other:?}"),
        }

        let rendered = errors.to_string();
        assert_eq!(rendered.matches(r#"required property "age""#).count(), 1);
        assert!(rendered.contains("should be number"));
    } else {
        panic!("Expected failure");
    }
}

#[test]
fn test_type_rejects_non_objects() {
    for input in [json!(null), json!([]), json!("x"), json!(1)] {
        let error = person().decode(&input).into_result().unwrap_err();
        assert_eq!(error, DecodeError::leaf(input, "Record<string, unknown>"));
    }
}

#[test]
fn test_partial_skips_absent_fields() {
    let decoder = partial([
        ("nickname", sync::string().erase()),
        ("age", sync::number().erase()),
    ]);

    let decoded = decoder.decode(&json!({"age": 4})).into_result().unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded["age"], json!(4));

    let error = decoder
        .decode(&json!({"nickname": 1, "age": "x"}))
        .into_result()
        .unwrap_err();
    let keys: Vec<(String, Kind)> = error
        .iter()
        .map(|node| match node {
            ErrorNode::Key { key, kind, .. } => (key.clone(), *kind),
            other => panic!("unexpected node {other:?}"),
        })
        .collect();
    assert_eq!(
        keys,
        vec![
            ("nickname".to_string(), Kind::Optional),
            ("age".to_string(), Kind::Optional)
        ]
    );
}

#[test]
fn test_record_keeps_input_order() {
    let decoder = record(sync::number());

    let decoded = decoder
        .decode(&json!({"z": 1, "a": 2, "m": 3}))
        .into_result()
        .unwrap();
    assert_eq!(decoded.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);

    let error = decoder
        .decode(&json!({"z": "1", "a": 2, "m": null}))
        .into_result()
        .unwrap_err();
    assert_eq!(
        error,
        DecodeError::key("z", Kind::Optional, DecodeError::leaf(json!("1"), "number")).concat(
            DecodeError::key("m", Kind::Optional, DecodeError::leaf(json!(null), "number"))
        )
    );
}

#[test]
fn test_array_reports_every_bad_element() {
    let decoder = array(sync::string());

    assert_eq!(
        decoder.decode(&json!(["a", "b"])).into_result().unwrap(),
        vec!["a".to_string(), "b".to_string()]
    );
    assert!(decoder.decode(&json!([])).is_success());

    let error = decoder.decode(&json!(["a", 1, "c", false])).into_result().unwrap_err();
    assert_eq!(
        error,
        DecodeError::index(1, Kind::Optional, DecodeError::leaf(json!(1), "string")).concat(
            DecodeError::index(3, Kind::Optional, DecodeError::leaf(json!(false), "string"))
        )
    );
}

#[test]
fn test_array_rejects_non_arrays() {
    let error = array(sync::string())
        .decode(&json!({"0": "a"}))
        .into_result()
        .unwrap_err();
    assert_eq!(error, DecodeError::leaf(json!({"0": "a"}), "Array<unknown>"));
}

#[test]
fn test_tuple_ignores_extra_elements() {
    let decoder = tuple(vec![sync::string().erase(), sync::number().erase()]);

    let decoded = decoder.decode(&json!(["x", 1, true])).into_result().unwrap();
    assert_eq!(decoded, vec![json!("x"), json!(1)]);
}

#[test]
fn test_tuple_missing_position() {
    let decoder = tuple(vec![sync::string().erase(), sync::number().erase()]);

    let error = decoder.decode(&json!(["x"])).into_result().unwrap_err();
    assert_eq!(
        error,
        DecodeError::index(1, Kind::Required, DecodeError::leaf(json!(null), "number"))
    );
}

#[test]
fn test_typed_tuples() {
    let pair = tuple2(sync::string(), sync::boolean());
    assert_eq!(
        pair.decode(&json!(["a", true])).into_result().unwrap(),
        ("a".to_string(), true)
    );

    let triple = tuple3(sync::number(), sync::number(), sync::number());
    let error = triple.decode(&json!([1, "2", "3"])).into_result().unwrap_err();
    assert_eq!(error.len(), 2);
}

#[test]
fn test_literal() {
    let decoder = literal::<schemata::Immediate, _, _>(["a", "b"]);
    assert_eq!(decoder.decode(&json!("b")).into_result().unwrap(), json!("b"));

    let error = decoder.decode(&json!("c")).into_result().unwrap_err();
    assert_eq!(error.to_string(), r#"cannot decode "c", should be "a" | "b""#);

    let numbers = literal::<schemata::Immediate, _, _>([1, 2]);
    assert!(numbers.decode(&json!(2.0)).is_success());
    assert!(numbers.decode(&json!("2")).is_failure());
}

#[test]
fn test_nullable() {
    let decoder = nullable(sync::number());

    assert_eq!(decoder.decode(&json!(null)).into_result().unwrap(), None);
    assert_eq!(decoder.decode(&json!(5)).into_result().unwrap(), Some(5.0));

    let error = decoder.decode(&json!("5")).into_result().unwrap_err();
    assert_eq!(
        error,
        DecodeError::member(0, DecodeError::leaf(json!("5"), "null"))
            .concat(DecodeError::member(1, DecodeError::leaf(json!("5"), "number")))
    );
}

#[test]
fn test_sum_delegates_to_member() {
    let shape = sum(
        "kind",
        [
            (
                "circle",
                type_([
                    ("kind", literal(["circle"])),
                    ("radius", sync::number().erase()),
                ]),
            ),
            (
                "rect",
                type_([
                    ("kind", literal(["rect"])),
                    ("width", sync::number().erase()),
                    ("height", sync::number().erase()),
                ]),
            ),
        ],
    );

    assert!(shape.decode(&json!({"kind": "circle", "radius": 2})).is_success());

    // The member's own errors come through untouched.
    let error = shape
        .decode(&json!({"kind": "rect", "width": 1}))
        .into_result()
        .unwrap_err();
    assert_eq!(
        error,
        DecodeError::key("height", Kind::Required, DecodeError::leaf(json!(null), "number"))
    );
}

#[test]
fn test_sum_unknown_tag() {
    let shape = sum("kind", [("a", sync::string().erase()), ("b", sync::string().erase())]);

    for input in [json!({"kind": "c"}), json!({}), json!({"kind": 1})] {
        let tag = input.get("kind").cloned().unwrap_or(Value::Null);
        let error = shape.decode(&input).into_result().unwrap_err();
        assert_eq!(
            error,
            DecodeError::key("kind", Kind::Required, DecodeError::leaf(tag, r#""a" | "b""#))
        );
    }
}

#[test]
fn test_sum_without_members() {
    let shape: SyncDecoder<Value> = sum("kind", Vec::<(String, SyncDecoder<Value>)>::new());
    let error = shape.decode(&json!({"kind": "a"})).into_result().unwrap_err();
    assert_eq!(
        error,
        DecodeError::key("kind", Kind::Required, DecodeError::leaf(json!("a"), "never"))
    );
}

#[test]
fn test_nested_errors_keep_their_path() {
    let decoder = type_([(
        "users",
        array(type_([("email", sync::string())])),
    )]);

    let error = decoder
        .decode(&json!({"users": [{"email": "a@b"}, {"email": 7}]}))
        .into_result()
        .unwrap_err();

    assert_eq!(
        error,
        DecodeError::key(
            "users",
            Kind::Required,
            DecodeError::index(
                1,
                Kind::Optional,
                DecodeError::key("email", Kind::Required, DecodeError::leaf(json!(7), "string"))
            )
        )
    );
    assert_eq!(error.leaves(), vec![(&json!(7), "string")]);
}
