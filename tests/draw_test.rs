//! Tests for rendering decode errors and results.

use schemata::{
    array, draw, nullable, partial, stringify, sync, tuple, type_, union, DecodeError, Kind,
};
use serde_json::json;

#[test]
fn test_draw_object_failures() {
    let decoder = type_([
        ("name", sync::string().erase()),
        ("age", sync::number().erase()),
        ("tags", array(sync::string()).erase()),
    ]);

    let error = decoder
        .decode(&json!({"age": "old", "tags": ["a", 1, null]}))
        .into_result()
        .unwrap_err();

    let expected = [
        r#"required property "name""#,
        "└─ cannot decode null, should be string",
        r#"required property "age""#,
        r#"└─ cannot decode "old", should be number"#,
        r#"required property "tags""#,
        "├─ optional index 1",
        "│  └─ cannot decode 1, should be string",
        "└─ optional index 2",
        "   └─ cannot decode null, should be string",
    ]
    .join("\n");

    assert_eq!(draw(&error), expected);
}

#[test]
fn test_draw_union_and_nullable() {
    let decoder = partial([(
        "id",
        union(vec![sync::string().erase(), nullable(sync::number()).erase()]),
    )]);

    let error = decoder.decode(&json!({"id": true})).into_result().unwrap_err();

    let expected = [
        r#"optional property "id""#,
        "├─ member 0",
        "│  └─ cannot decode true, should be string",
        "└─ member 1",
        "   ├─ member 0",
        "   │  └─ cannot decode true, should be null",
        "   └─ member 1",
        "      └─ cannot decode true, should be number",
    ]
    .join("\n");

    assert_eq!(draw(&error), expected);
}

#[test]
fn test_draw_tuple() {
    let decoder = tuple(vec![sync::number().erase(), sync::number().erase()]);
    let error = decoder.decode(&json!([1])).into_result().unwrap_err();
    assert_eq!(
        draw(&error),
        "required index 1\n└─ cannot decode null, should be number"
    );
}

#[test]
fn test_draw_escapes_keys_and_values() {
    let error = DecodeError::key(
        "say \"hi\"",
        Kind::Required,
        DecodeError::leaf(json!("line\nbreak"), "string"),
    );
    assert_eq!(
        draw(&error),
        [
            r#"required property "say \"hi\"""#,
            r#"└─ cannot decode "line\nbreak", should be string"#,
        ]
        .join("\n")
    );
}

#[test]
fn test_draw_is_deterministic() {
    let decoder = type_([("a", sync::string()), ("b", sync::string())]);
    let input = json!({"a": 1, "b": 2});

    let first = draw(&decoder.decode(&input).into_result().unwrap_err());
    let second = draw(&decoder.decode(&input).into_result().unwrap_err());
    assert_eq!(first, second);
}

#[test]
fn test_stringify() {
    let decoder = type_([("a", sync::number())]);

    assert_eq!(stringify(&decoder.decode(&json!({"a": 1}))), "{\n  \"a\": 1\n}");
    assert_eq!(
        stringify(&decoder.decode(&json!({}))),
        "required property \"a\"\n└─ cannot decode null, should be number"
    );
}

#[test]
fn test_refine_failure_shows_input_number() {
    let positive = sync::number().refine(|n| *n > 0.0, "Positive");

    assert_eq!(
        stringify(&positive.decode(&json!(-1))),
        "cannot decode -1, should be Positive"
    );
    assert_eq!(
        stringify(&positive.decode(&json!(-1.5))),
        "cannot decode -1.5, should be Positive"
    );
}

#[test]
fn test_stringify_keeps_fractions() {
    let decoder = type_([("a", sync::number()), ("b", sync::number())]);

    assert_eq!(
        stringify(&decoder.decode(&json!({"a": 2, "b": 0.5}))),
        "{\n  \"a\": 2,\n  \"b\": 0.5\n}"
    );
}
