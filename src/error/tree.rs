//! The decode error tree.
//!
//! [`DecodeError`] is a free semigroup over [`ErrorNode`]: either a single node
//! or the concatenation of two trees. Concatenation is O(1) and never inspects,
//! reorders or collapses its operands; flattening is deferred until the tree is
//! traversed or rendered.

use std::fmt::{self, Display};

use serde_json::Value;
use stillwater::{NonEmptyVec, Semigroup};

use super::node::{ErrorNode, Kind};

/// A non-empty, ordered accumulation of decode failures.
///
/// Equality compares the flattened left-to-right node sequence, so the way
/// concatenations were nested is not observable:
///
/// ```rust
/// use schemata::DecodeError;
/// use serde_json::json;
///
/// let a = DecodeError::leaf(json!(1), "string");
/// let b = DecodeError::leaf(json!(2), "string");
/// let c = DecodeError::leaf(json!(3), "string");
///
/// let left = a.clone().concat(b.clone()).concat(c.clone());
/// let right = a.concat(b.concat(c));
///
/// assert_eq!(left, right);
/// assert_eq!(left.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub enum DecodeError {
    /// A single error node.
    Of(Box<ErrorNode>),
    /// Two sub-trees; every node of the left one comes first.
    Concat(Box<DecodeError>, Box<DecodeError>),
}

impl DecodeError {
    /// Wraps a single node.
    pub fn of(node: ErrorNode) -> Self {
        DecodeError::Of(Box::new(node))
    }

    /// A terminal mismatch: `actual` could not be decoded as `expected`.
    pub fn leaf(actual: Value, expected: impl Into<String>) -> Self {
        Self::of(ErrorNode::Leaf {
            actual,
            expected: expected.into(),
        })
    }

    /// A failure inside the object field `key`.
    pub fn key(key: impl Into<String>, kind: Kind, errors: DecodeError) -> Self {
        Self::of(ErrorNode::Key {
            key: key.into(),
            kind,
            errors,
        })
    }

    /// A failure inside the array or tuple slot `index`.
    pub fn index(index: usize, kind: Kind, errors: DecodeError) -> Self {
        Self::of(ErrorNode::Index {
            index,
            kind,
            errors,
        })
    }

    /// A failure inside union branch `index`.
    pub fn member(index: usize, errors: DecodeError) -> Self {
        Self::of(ErrorNode::Member { index, errors })
    }

    /// A failure inside the recursive schema `id`.
    pub fn lazy(id: impl Into<String>, errors: DecodeError) -> Self {
        Self::of(ErrorNode::Lazy {
            id: id.into(),
            errors,
        })
    }

    /// Appends `other` after `self`.
    pub fn concat(self, other: DecodeError) -> Self {
        DecodeError::Concat(Box::new(self), Box::new(other))
    }

    /// Concatenates many trees in order, or returns `None` if there are none.
    ///
    /// The result is balanced, so accumulating the failures of a very large
    /// array does not build a spine as deep as the array is long.
    pub fn concat_all<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = DecodeError>,
    {
        let mut level: Vec<DecodeError> = errors.into_iter().collect();

        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            let mut pending = level.into_iter();
            while let Some(left) = pending.next() {
                match pending.next() {
                    Some(right) => next.push(left.concat(right)),
                    None => next.push(left),
                }
            }
            level = next;
        }

        level.pop()
    }

    /// Iterates over the nodes of this tree, left to right.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Returns the number of top-level nodes.
    ///
    /// Nested errors inside `Key`, `Index`, `Member` and `Lazy` nodes are not
    /// counted.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns false; a decode error always holds at least one node.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the leftmost node.
    pub fn first(&self) -> &ErrorNode {
        let mut current = self;
        loop {
            match current {
                DecodeError::Of(node) => return &**node,
                DecodeError::Concat(left, _) => current = &**left,
            }
        }
    }

    /// Flattens this tree into its nodes, left to right.
    pub fn into_nodes(self) -> NonEmptyVec<ErrorNode> {
        let mut stack = vec![self];
        let mut nodes = Vec::new();

        while let Some(tree) = stack.pop() {
            match tree {
                DecodeError::Of(node) => nodes.push(*node),
                DecodeError::Concat(left, right) => {
                    stack.push(*right);
                    stack.push(*left);
                }
            }
        }

        NonEmptyVec::from_vec(nodes).expect("a decode error holds at least one node")
    }

    /// Returns every leaf reachable from this tree, depth first, left to right.
    ///
    /// Useful for callers that only care about the terminal mismatches and not
    /// the path that led to them.
    pub fn leaves(&self) -> Vec<(&Value, &str)> {
        let mut leaves = Vec::new();
        collect_leaves(self, &mut leaves);
        leaves
    }
}

fn collect_leaves<'a>(tree: &'a DecodeError, out: &mut Vec<(&'a Value, &'a str)>) {
    for node in tree.iter() {
        match node {
            ErrorNode::Leaf { actual, expected } => out.push((actual, expected.as_str())),
            other => {
                if let Some(children) = other.children() {
                    collect_leaves(children, out);
                }
            }
        }
    }
}

/// Iterator over the top-level nodes of a [`DecodeError`], left to right.
///
/// Traversal uses an explicit stack, so arbitrarily deep concatenation spines
/// are walked without recursion.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    stack: Vec<&'a DecodeError>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a ErrorNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(tree) = self.stack.pop() {
            match tree {
                DecodeError::Of(node) => return Some(&**node),
                DecodeError::Concat(left, right) => {
                    self.stack.push(&**right);
                    self.stack.push(&**left);
                }
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a DecodeError {
    type Item = &'a ErrorNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for DecodeError {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Semigroup for DecodeError {
    fn combine(self, other: Self) -> Self {
        self.concat(other)
    }
}

impl From<ErrorNode> for DecodeError {
    fn from(node: ErrorNode) -> Self {
        DecodeError::of(node)
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::draw::draw(self))
    }
}

impl std::error::Error for DecodeError {}

// Decoders are shared across threads and task decoders move errors between
// them, so the tree must stay Send + Sync.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<DecodeError>();
    assert_sync::<DecodeError>();
};
