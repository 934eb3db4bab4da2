//! Array-shaped combinators: `array` and the `tuple` family.
//!
//! All of them require the input to be a JSON array and report a
//! `Leaf(input, "Array<unknown>")` otherwise.

use serde_json::Value;

use crate::effect::Effect;
use crate::error::{DecodeError, Kind};

use super::primitives::UNKNOWN_ARRAY;
use super::{Decoder, MISSING};

fn as_array<M, A>(input: &Value) -> Result<&[Value], M::Validated<A>>
where
    M: Effect,
    A: Send + 'static,
{
    input
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| M::failure(DecodeError::leaf(input.clone(), UNKNOWN_ARRAY)))
}

fn decode_slot<M, A>(
    index: usize,
    kind: Kind,
    decoder: &Decoder<M, A>,
    items: &[Value],
) -> M::Validated<A>
where
    M: Effect,
    A: Send + 'static,
{
    let value = items.get(index).unwrap_or(&MISSING);
    M::map_err(decoder.decode(value), move |e| DecodeError::index(index, kind, e))
}

/// Decodes every element of an array against `item`.
///
/// Every element is decoded, and each failure is reported as
/// `Index(position, Optional, err)`.
pub fn array<M, A>(item: Decoder<M, A>) -> Decoder<M, Vec<A>>
where
    M: Effect,
    A: Send + 'static,
{
    Decoder::new(move |input| {
        let items = match as_array::<M, _>(input) {
            Ok(items) => items,
            Err(failure) => return failure,
        };

        let decoded = (0..items.len())
            .map(|index| decode_slot(index, Kind::Optional, &item, items))
            .collect();

        M::sequence(decoded)
    })
}

/// Decodes a fixed-length prefix of an array, one decoder per position.
///
/// Positions beyond `components` are ignored; a missing position is decoded
/// as `null`. Failures are reported as `Index(position, Required, err)`.
///
/// # Example
///
/// ```rust
/// use schemata::{sync, tuple};
/// use serde_json::json;
///
/// let pair = tuple(vec![sync::string().erase(), sync::number().erase()]);
///
/// assert!(pair.decode(&json!(["x", 1, true])).is_success());
/// assert!(pair.decode(&json!(["x"])).is_failure());
/// ```
pub fn tuple<M, A>(components: Vec<Decoder<M, A>>) -> Decoder<M, Vec<A>>
where
    M: Effect,
    A: Send + 'static,
{
    Decoder::new(move |input| {
        let items = match as_array::<M, _>(input) {
            Ok(items) => items,
            Err(failure) => return failure,
        };

        let decoded = components
            .iter()
            .enumerate()
            .map(|(index, component)| decode_slot(index, Kind::Required, component, items))
            .collect();

        M::sequence(decoded)
    })
}

/// A two-position tuple with independently typed components.
pub fn tuple2<M, A, B>(first: Decoder<M, A>, second: Decoder<M, B>) -> Decoder<M, (A, B)>
where
    M: Effect,
    A: Send + 'static,
    B: Send + 'static,
{
    Decoder::new(move |input| {
        let items = match as_array::<M, _>(input) {
            Ok(items) => items,
            Err(failure) => return failure,
        };

        M::zip(
            decode_slot(0, Kind::Required, &first, items),
            decode_slot(1, Kind::Required, &second, items),
        )
    })
}

/// A three-position tuple with independently typed components.
pub fn tuple3<M, A, B, C>(
    first: Decoder<M, A>,
    second: Decoder<M, B>,
    third: Decoder<M, C>,
) -> Decoder<M, (A, B, C)>
where
    M: Effect,
    A: Send + 'static,
    B: Send + 'static,
    C: Send + 'static,
{
    Decoder::new(move |input| {
        let items = match as_array::<M, _>(input) {
            Ok(items) => items,
            Err(failure) => return failure,
        };

        let head = M::zip(
            decode_slot(0, Kind::Required, &first, items),
            decode_slot(1, Kind::Required, &second, items),
        );
        let all = M::zip(head, decode_slot(2, Kind::Required, &third, items));
        M::map(all, |((a, b), c)| (a, b, c))
    })
}
