//! Decoders built directly from type-guards and literals.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::effect::Effect;
use crate::error::DecodeError;
use crate::guard::{
    BooleanGuard, Guard, NumberGuard, StringGuard, UnknownArrayGuard, UnknownRecordGuard,
};

use super::{join_alternatives, Decoder};

/// Expected-label used when an array was required.
pub const UNKNOWN_ARRAY: &str = "Array<unknown>";

/// Expected-label used when an object was required.
pub const UNKNOWN_RECORD: &str = "Record<string, unknown>";

/// Builds a decoder from a type-guard.
///
/// Succeeds with the narrowed value when the guard passes, otherwise fails
/// with `Leaf(input, expected)`.
pub fn from_guard<M, A, G>(guard: G, expected: impl Into<String>) -> Decoder<M, A>
where
    M: Effect,
    A: Send + 'static,
    G: Guard<A> + 'static,
{
    let expected: Arc<str> = Arc::from(expected.into());
    Decoder::new(move |input| match guard.guard(input) {
        Some(value) => M::success(value),
        None => M::failure(DecodeError::leaf(input.clone(), &*expected)),
    })
}

/// Succeeds only when the input strictly equals one of `values`.
///
/// Numbers compare by numeric value, so `1` matches a literal `1.0`. The
/// failure message lists every accepted literal as JSON, separated by ` | `.
///
/// # Example
///
/// ```rust
/// use schemata::{literal, SyncDecoder};
/// use serde_json::{json, Value};
///
/// let method: SyncDecoder<Value> = literal(["GET", "POST"]);
/// assert!(method.decode(&json!("GET")).is_success());
///
/// let error = method.decode(&json!("PUT")).into_result().unwrap_err();
/// assert_eq!(error.to_string(), r#"cannot decode "PUT", should be "GET" | "POST""#);
/// ```
pub fn literal<M, I, V>(values: I) -> Decoder<M, Value>
where
    M: Effect,
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    let expected: Arc<str> = Arc::from(join_alternatives(&values));

    Decoder::new(move |input| {
        match values.iter().find(|literal| strict_eq(literal, input)) {
            Some(literal) => M::success(literal.clone()),
            None => M::failure(DecodeError::leaf(input.clone(), &*expected)),
        }
    })
}

fn strict_eq(literal: &Value, input: &Value) -> bool {
    match (literal, input) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::Array(_), _) | (Value::Object(_), _) => false,
        _ => literal == input,
    }
}

/// Decodes a JSON string.
pub fn string<M: Effect>() -> Decoder<M, String> {
    from_guard(StringGuard, "string")
}

/// Decodes a JSON number as `f64`.
pub fn number<M: Effect>() -> Decoder<M, f64> {
    from_guard(NumberGuard, "number")
}

/// Decodes a JSON boolean.
pub fn boolean<M: Effect>() -> Decoder<M, bool> {
    from_guard(BooleanGuard, "boolean")
}

/// Decodes any JSON array, leaving its elements untyped.
pub fn unknown_array<M: Effect>() -> Decoder<M, Vec<Value>> {
    from_guard(UnknownArrayGuard, UNKNOWN_ARRAY)
}

/// Decodes any JSON object, leaving its entries untyped.
pub fn unknown_record<M: Effect>() -> Decoder<M, Map<String, Value>> {
    from_guard(UnknownRecordGuard, UNKNOWN_RECORD)
}
