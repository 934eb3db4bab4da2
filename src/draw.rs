//! Text rendering of decode errors and results.
//!
//! Every top-level node of a [`DecodeError`] is drawn as its own tree, with
//! nested errors indented beneath their container:
//!
//! ```text
//! required property "a"
//! ├─ cannot decode "1", should be number
//! └─ cannot decode null, should be number
//! ```

use serde::Serialize;
use stillwater::Validation;

use crate::decoder::to_actual;
use crate::error::{DecodeError, ErrorNode};
use crate::DecodeResult;

/// Renders an error tree as text, one block per top-level node.
///
/// Rendering walks the tree with an explicit stack, so deeply nested errors
/// from recursive schemas do not grow the call stack.
///
/// # Example
///
/// ```rust
/// use schemata::{draw, DecodeError, Kind};
/// use serde_json::json;
///
/// let error = DecodeError::key(
///     "a",
///     Kind::Required,
///     DecodeError::leaf(json!("1"), "number"),
/// );
///
/// assert_eq!(
///     draw(&error),
///     "required property \"a\"\n└─ cannot decode \"1\", should be number"
/// );
/// ```
pub fn draw(error: &DecodeError) -> String {
    let mut out = String::new();
    for (i, node) in error.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        draw_node(node, &mut out);
    }
    out
}

struct Frame<'a> {
    node: &'a ErrorNode,
    indentation: String,
    last: bool,
}

fn draw_node(root: &ErrorNode, out: &mut String) {
    out.push_str(&root.to_string());

    let mut stack = Vec::new();
    push_children(root, "", &mut stack);

    while let Some(frame) = stack.pop() {
        out.push('\n');
        out.push_str(&frame.indentation);
        out.push_str(if frame.last { "└─ " } else { "├─ " });
        out.push_str(&frame.node.to_string());

        let indentation = format!(
            "{}{}",
            frame.indentation,
            if frame.last { "   " } else { "│  " }
        );
        push_children(frame.node, &indentation, &mut stack);
    }
}

// Children are pushed in reverse so they pop in order.
fn push_children<'a>(node: &'a ErrorNode, indentation: &str, stack: &mut Vec<Frame<'a>>) {
    let Some(children) = node.children() else {
        return;
    };
    let children: Vec<&ErrorNode> = children.iter().collect();
    let count = children.len();

    for (i, child) in children.into_iter().enumerate().rev() {
        stack.push(Frame {
            node: child,
            indentation: indentation.to_string(),
            last: i + 1 == count,
        });
    }
}

/// Renders a decode result: pretty JSON on success, [`draw`] on failure.
///
/// # Example
///
/// ```rust
/// use schemata::{stringify, sync};
/// use serde_json::json;
///
/// assert_eq!(stringify(&sync::number().decode(&json!(1))), "1");
/// assert_eq!(
///     stringify(&sync::number().decode(&json!("1"))),
///     "cannot decode \"1\", should be number"
/// );
/// ```
pub fn stringify<A: Serialize>(result: &DecodeResult<A>) -> String {
    match result {
        Validation::Success(value) => serde_json::to_string_pretty(&to_actual(value))
            .unwrap_or_else(|e| format!("<unserializable value: {e}>")),
        Validation::Failure(error) => draw(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;
    use serde_json::json;

    #[test]
    fn test_draw_leaf() {
        let error = DecodeError::leaf(json!({"a": 1}), "string");
        assert_eq!(draw(&error), r#"cannot decode {"a":1}, should be string"#);
    }

    #[test]
    fn test_draw_siblings_and_nesting() {
        let error = DecodeError::key(
            "a",
            Kind::Required,
            DecodeError::index(
                0,
                Kind::Optional,
                DecodeError::leaf(json!(1), "string"),
            )
            .concat(DecodeError::index(
                2,
                Kind::Optional,
                DecodeError::leaf(json!(null), "string"),
            )),
        )
        .concat(DecodeError::member(1, DecodeError::leaf(json!(true), "number")));

        let expected = [
            r#"required property "a""#,
            "├─ optional index 0",
            "│  └─ cannot decode 1, should be string",
            "└─ optional index 2",
            "   └─ cannot decode null, should be string",
            "member 1",
            "└─ cannot decode true, should be number",
        ]
        .join("\n");

        assert_eq!(draw(&error), expected);
    }

    #[test]
    fn test_draw_is_stable() {
        let error = DecodeError::lazy("T", DecodeError::leaf(json!([]), "T"));
        assert_eq!(draw(&error), draw(&error.clone()));
        assert_eq!(draw(&error), error.to_string());
    }

    #[test]
    fn test_stringify_success_is_pretty_json() {
        let result: DecodeResult<serde_json::Value> = Validation::Success(json!({"a": [1]}));
        assert_eq!(stringify(&result), "{\n  \"a\": [\n    1\n  ]\n}");
    }
}
