//! Object-shaped combinators: `type_`, `partial`, `record` and `sum`.
//!
//! All of them require the input to be a JSON object and report a
//! `Leaf(input, "Record<string, unknown>")` otherwise.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::effect::Effect;
use crate::error::{DecodeError, Kind};

use super::primitives::UNKNOWN_RECORD;
use super::{join_alternatives, Decoder, MISSING};

fn collect_fields<M, A, K, I>(fields: I) -> Vec<(String, Decoder<M, A>)>
where
    M: Effect,
    A: Send + 'static,
    K: Into<String>,
    I: IntoIterator<Item = (K, Decoder<M, A>)>,
{
    fields
        .into_iter()
        .map(|(name, decoder)| (name.into(), decoder))
        .collect()
}

fn as_record<M, A>(input: &Value) -> Result<&Map<String, Value>, M::Validated<A>>
where
    M: Effect,
    A: Send + 'static,
{
    input
        .as_object()
        .ok_or_else(|| M::failure(DecodeError::leaf(input.clone(), UNKNOWN_RECORD)))
}

/// Decodes a field and pairs it with its name, wrapping any failure in
/// `Key(name, kind, err)`.
fn decode_entry<M, A>(
    name: &str,
    kind: Kind,
    decoder: &Decoder<M, A>,
    value: &Value,
) -> M::Validated<(String, A)>
where
    M: Effect,
    A: Send + 'static,
{
    let key = name.to_owned();
    let decoded = M::map_err(decoder.decode(value), move |e| DecodeError::key(key, kind, e));
    let key = name.to_owned();
    M::map(decoded, move |a| (key, a))
}

fn into_fields<M, A>(entries: Vec<M::Validated<(String, A)>>) -> M::Validated<IndexMap<String, A>>
where
    M: Effect,
    A: Send + 'static,
{
    M::map(M::sequence(entries), |pairs| pairs.into_iter().collect())
}

/// Decodes an object with a fixed set of required fields.
///
/// Every declared field is decoded, even after one has failed, and every
/// failure is reported as `Key(name, Required, err)`. A missing field is
/// decoded as `null`. The output holds exactly the declared fields, in
/// declaration order; undeclared input fields are dropped.
///
/// # Example
///
/// ```rust
/// use schemata::{sync, type_};
/// use serde_json::json;
///
/// let point = type_([("x", sync::number()), ("y", sync::number())]);
///
/// let decoded = point.decode(&json!({"x": 1, "y": 2, "z": 3})).into_result().unwrap();
/// assert_eq!(decoded.keys().collect::<Vec<_>>(), vec!["x", "y"]);
///
/// let error = point.decode(&json!({"x": "1"})).into_result().unwrap_err();
/// assert_eq!(error.len(), 2);
/// ```
pub fn type_<M, A, K, I>(fields: I) -> Decoder<M, IndexMap<String, A>>
where
    M: Effect,
    A: Send + 'static,
    K: Into<String>,
    I: IntoIterator<Item = (K, Decoder<M, A>)>,
{
    let fields = collect_fields(fields);

    Decoder::new(move |input| {
        let record = match as_record::<M, _>(input) {
            Ok(record) => record,
            Err(failure) => return failure,
        };

        let entries = fields
            .iter()
            .map(|(name, decoder)| {
                let value = record.get(name).unwrap_or(&MISSING);
                decode_entry(name, Kind::Required, decoder, value)
            })
            .collect();

        into_fields::<M, A>(entries)
    })
}

/// Decodes an object whose declared fields may each be absent.
///
/// Absent fields are left out of the output. Present but invalid fields are
/// reported as `Key(name, Optional, err)`.
pub fn partial<M, A, K, I>(fields: I) -> Decoder<M, IndexMap<String, A>>
where
    M: Effect,
    A: Send + 'static,
    K: Into<String>,
    I: IntoIterator<Item = (K, Decoder<M, A>)>,
{
    let fields = collect_fields(fields);

    Decoder::new(move |input| {
        let record = match as_record::<M, _>(input) {
            Ok(record) => record,
            Err(failure) => return failure,
        };

        let entries = fields
            .iter()
            .filter_map(|(name, decoder)| {
                let value = record.get(name)?;
                Some(decode_entry(name, Kind::Optional, decoder, value))
            })
            .collect();

        into_fields::<M, A>(entries)
    })
}

/// Decodes every entry of an object against `codomain`.
///
/// Failures are reported as `Key(key, Optional, err)`, in input order.
pub fn record<M, A>(codomain: Decoder<M, A>) -> Decoder<M, IndexMap<String, A>>
where
    M: Effect,
    A: Send + 'static,
{
    Decoder::new(move |input| {
        let record = match as_record::<M, _>(input) {
            Ok(record) => record,
            Err(failure) => return failure,
        };

        let entries = record
            .iter()
            .map(|(key, value)| decode_entry(key, Kind::Optional, &codomain, value))
            .collect();

        into_fields::<M, A>(entries)
    })
}

/// Decodes a tagged union.
///
/// Reads the string field `tag` and delegates the whole input to the member
/// registered under that value. An unknown, missing or non-string tag fails
/// with `Key(tag, Required, Leaf(value, "\"a\" | \"b\""))`, or `never` when
/// there are no members.
///
/// # Example
///
/// ```rust
/// use schemata::{literal, sum, sync, type_};
/// use serde_json::json;
///
/// let shape = sum(
///     "type",
///     [
///         ("circle", type_([("type", literal(["circle"])), ("radius", sync::number().erase())])),
///         ("square", type_([("type", literal(["square"])), ("side", sync::number().erase())])),
///     ],
/// );
///
/// assert!(shape.decode(&json!({"type": "circle", "radius": 1})).is_success());
///
/// let error = shape.decode(&json!({"type": "hexagon"})).into_result().unwrap_err();
/// assert!(error.to_string().contains(r#"should be "circle" | "square""#));
/// ```
pub fn sum<M, A, K, I>(tag: impl Into<String>, members: I) -> Decoder<M, A>
where
    M: Effect,
    A: Send + 'static,
    K: Into<String>,
    I: IntoIterator<Item = (K, Decoder<M, A>)>,
{
    let tag: Arc<str> = Arc::from(tag.into());
    let members: IndexMap<String, Decoder<M, A>> = members
        .into_iter()
        .map(|(name, decoder)| (name.into(), decoder))
        .collect();
    let expected: Arc<str> = if members.is_empty() {
        Arc::from("never")
    } else {
        let keys: Vec<Value> = members.keys().map(|key| Value::from(key.as_str())).collect();
        Arc::from(join_alternatives(&keys))
    };

    Decoder::new(move |input| {
        let record = match as_record::<M, _>(input) {
            Ok(record) => record,
            Err(failure) => return failure,
        };

        let value = record.get(&*tag).unwrap_or(&MISSING);
        match value.as_str().and_then(|name| members.get(name)) {
            Some(member) => member.decode(input),
            None => {
                tracing::debug!(tag = %tag, value = %value, "no sum member for tag");
                M::failure(DecodeError::key(
                    &*tag,
                    Kind::Required,
                    DecodeError::leaf(value.clone(), &*expected),
                ))
            }
        }
    })
}
