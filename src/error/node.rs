//! Error nodes.
//!
//! Each [`ErrorNode`] is either a terminal mismatch ([`ErrorNode::Leaf`]) or a
//! containment marker that wraps a nested [`DecodeError`] with the position it
//! was found at.

use std::fmt::{self, Display};

use serde_json::Value;

use super::tree::DecodeError;

/// Whether the field or slot an error was found in is mandatory.
///
/// Carried into [`ErrorNode::Key`] and [`ErrorNode::Index`] so rendered
/// diagnostics read `required property "name"` or `optional index 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The field or slot must be present and valid.
    Required,
    /// The field or slot may be absent, but was present and invalid.
    Optional,
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Required => f.write_str("required"),
            Kind::Optional => f.write_str("optional"),
        }
    }
}

/// A single node of a decode error.
///
/// The `Display` output of a node is its own one-line label; nested errors are
/// not included. Use [`crate::draw`] to render a node together with its
/// children.
///
/// # Example
///
/// ```rust
/// use schemata::{ErrorNode, Kind, DecodeError};
/// use serde_json::json;
///
/// let node = ErrorNode::Key {
///     key: "age".to_string(),
///     kind: Kind::Required,
///     errors: DecodeError::leaf(json!(null), "number"),
/// };
///
/// assert_eq!(node.to_string(), r#"required property "age""#);
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorNode {
    /// A terminal mismatch between the actual value and what was expected.
    #[error("cannot decode {actual}, should be {expected}")]
    Leaf {
        /// The value that failed to decode.
        actual: Value,
        /// Description of what was expected (`string`, `"a" | "b"`, ...).
        expected: String,
    },

    /// A failure inside a named object field.
    #[error("{kind} property {}", Value::from(.key.as_str()))]
    Key {
        /// The field name.
        key: String,
        /// Whether the field was mandatory.
        kind: Kind,
        /// What went wrong inside the field.
        errors: DecodeError,
    },

    /// A failure inside an array or tuple slot.
    #[error("{kind} index {index}")]
    Index {
        /// Zero-based position.
        index: usize,
        /// Whether the slot was mandatory.
        kind: Kind,
        /// What went wrong inside the slot.
        errors: DecodeError,
    },

    /// A failure inside one alternative of a union or nullable.
    #[error("member {index}")]
    Member {
        /// Zero-based branch position, in declaration order.
        index: usize,
        /// Why that branch rejected the input.
        errors: DecodeError,
    },

    /// A failure inside a recursive schema, tagged with its identifier.
    #[error("lazy type {id}")]
    Lazy {
        /// Identifier given to [`crate::lazy`].
        id: String,
        /// What went wrong inside the recursive schema.
        errors: DecodeError,
    },
}

impl ErrorNode {
    /// Returns the nested error tree, or `None` for a leaf.
    pub fn children(&self) -> Option<&DecodeError> {
        match self {
            ErrorNode::Leaf { .. } => None,
            ErrorNode::Key { errors, .. }
            | ErrorNode::Index { errors, .. }
            | ErrorNode::Member { errors, .. }
            | ErrorNode::Lazy { errors, .. } => Some(errors),
        }
    }

    /// Returns true for [`ErrorNode::Leaf`].
    pub fn is_leaf(&self) -> bool {
        matches!(self, ErrorNode::Leaf { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaf_label() {
        let node = ErrorNode::Leaf {
            actual: json!({"a": 1}),
            expected: "string".to_string(),
        };
        assert_eq!(node.to_string(), r#"cannot decode {"a":1}, should be string"#);
        assert!(node.is_leaf());
        assert!(node.children().is_none());
    }

    #[test]
    fn test_container_labels() {
        let inner = DecodeError::leaf(json!(1), "string");

        let key = ErrorNode::Key {
            key: "name".to_string(),
            kind: Kind::Optional,
            errors: inner.clone(),
        };
        assert_eq!(key.to_string(), r#"optional property "name""#);

        let index = ErrorNode::Index {
            index: 3,
            kind: Kind::Required,
            errors: inner.clone(),
        };
        assert_eq!(index.to_string(), "required index 3");

        let member = ErrorNode::Member {
            index: 1,
            errors: inner.clone(),
        };
        assert_eq!(member.to_string(), "member 1");

        let lazy = ErrorNode::Lazy {
            id: "Category".to_string(),
            errors: inner.clone(),
        };
        assert_eq!(lazy.to_string(), "lazy type Category");
        assert_eq!(lazy.children(), Some(&inner));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Kind::Required.to_string(), "required");
        assert_eq!(Kind::Optional.to_string(), "optional");
    }
}
