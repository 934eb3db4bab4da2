//! Alternatives and conjunctions: `union`, `nullable` and `intersect`.

use std::hash::Hash;

use indexmap::IndexMap;
use serde_json::Value;

use crate::effect::Effect;
use crate::error::DecodeError;

use super::Decoder;

/// Tries each member in order and returns the first success.
///
/// If every member fails, the error holds `Member(index, err)` for each one,
/// in declaration order.
///
/// # Panics
///
/// Panics if `members` is empty; a union needs at least one alternative.
pub fn union<M, A>(members: Vec<Decoder<M, A>>) -> Decoder<M, A>
where
    M: Effect,
    A: Send + 'static,
{
    assert!(!members.is_empty(), "union requires at least one member");

    Decoder::new(move |input| {
        let mut out = M::map_err(members[0].decode(input), |e| DecodeError::member(0, e));

        for (index, member) in members.iter().enumerate().skip(1) {
            let member = member.clone();
            let input = input.clone();
            out = M::alt(out, move || {
                M::map_err(member.decode(&input), move |e| DecodeError::member(index, e))
            });
        }

        out
    })
}

/// Accepts `null` as `None`, and otherwise delegates to `or`.
///
/// A failure is reported as both alternatives having failed:
/// `Member(0, Leaf(input, "null"))` followed by `Member(1, err)`.
pub fn nullable<M, A>(or: Decoder<M, A>) -> Decoder<M, Option<A>>
where
    M: Effect,
    A: Send + 'static,
{
    Decoder::new(move |input| {
        if input.is_null() {
            return M::success(None);
        }

        let actual = input.clone();
        M::map_err(M::map(or.decode(input), Some), move |e| {
            DecodeError::member(0, DecodeError::leaf(actual, "null"))
                .concat(DecodeError::member(1, e))
        })
    })
}

/// Values that can be merged when two decoders accept the same input.
pub trait Intersect {
    /// Merges `other` into `self`; on conflict, `other` wins.
    fn intersect(self, other: Self) -> Self;
}

impl<K: Hash + Eq, V> Intersect for IndexMap<K, V> {
    fn intersect(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

/// Objects are merged shallowly; any other pair yields `other`.
impl Intersect for Value {
    fn intersect(self, other: Self) -> Self {
        match (self, other) {
            (Value::Object(mut left), Value::Object(right)) => {
                left.extend(right);
                Value::Object(left)
            }
            (_, other) => other,
        }
    }
}

/// Decodes the same input with both decoders and merges the results.
///
/// Succeeds only when both succeed; otherwise the errors of whichever sides
/// failed are reported, `left`'s first.
///
/// # Example
///
/// ```rust
/// use schemata::{intersect, partial, sync, type_};
/// use serde_json::json;
///
/// let decoder = intersect(
///     type_([("a", sync::string().erase())]),
///     partial([("b", sync::number().erase())]),
/// );
///
/// let merged = decoder.decode(&json!({"a": "x", "b": 1})).into_result().unwrap();
/// assert_eq!(merged.len(), 2);
/// ```
pub fn intersect<M, A>(left: Decoder<M, A>, right: Decoder<M, A>) -> Decoder<M, A>
where
    M: Effect,
    A: Intersect + Send + 'static,
{
    Decoder::new(move |input| {
        M::map(M::zip(left.decode(input), right.decode(input)), |(a, b)| {
            a.intersect(b)
        })
    })
}
