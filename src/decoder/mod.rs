//! The generic decoding engine.
//!
//! A [`Decoder<M, A>`] turns an untyped [`serde_json::Value`] into an `A`,
//! carrying the result in the validation effect `M`. Every combinator in this
//! module is written once, generically over `M`, and instantiated by the
//! [`crate::sync`] and [`crate::task`] flavors.
//!
//! Combinators never short-circuit across independent siblings: object fields,
//! array elements, record entries and intersection halves are all decoded, and
//! every failure is kept in the resulting [`DecodeError`].
//!
//! # Example
//!
//! ```rust
//! use schemata::{sync, type_, union, DecodeError};
//! use serde_json::json;
//!
//! let person = type_([
//!     ("name", sync::string().erase()),
//!     ("age", sync::number().erase()),
//! ]);
//!
//! assert!(person.decode(&json!({"name": "a", "age": 1})).is_success());
//!
//! let id = union(vec![sync::string().erase(), sync::number().erase()]);
//! let error = id.decode(&json!(true)).into_result().unwrap_err();
//! assert_eq!(error.len(), 2);
//! ```

mod array;
mod object;
mod primitives;
mod union;

pub use array::{array, tuple, tuple2, tuple3};
pub use object::{partial, record, sum, type_};
pub use primitives::{
    boolean, from_guard, literal, number, string, unknown_array, unknown_record, UNKNOWN_ARRAY,
    UNKNOWN_RECORD,
};
pub use union::{intersect, nullable, union, Intersect};

use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use serde::Serialize;
use serde_json::{Number, Value};

use crate::effect::Effect;
use crate::error::DecodeError;

/// Stand-in for a field or slot that is absent from the input.
pub(crate) static MISSING: Value = Value::Null;

/// A schema-driven function from an untyped value to an `A`.
///
/// Decoders are immutable and cheap to clone; clones share the same
/// underlying function. They hold no per-call state, so one instance can be
/// used from many threads at once.
pub struct Decoder<M: Effect, A: Send + 'static> {
    run: Arc<dyn Fn(&Value) -> M::Validated<A> + Send + Sync>,
}

impl<M: Effect, A: Send + 'static> Clone for Decoder<M, A> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<M: Effect, A: Send + 'static> fmt::Debug for Decoder<M, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("effect", &std::any::type_name::<M>())
            .field("output", &std::any::type_name::<A>())
            .finish()
    }
}

impl<M: Effect, A: Send + 'static> Decoder<M, A> {
    /// Builds a decoder from a raw decode function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> M::Validated<A> + Send + Sync + 'static,
    {
        Self { run: Arc::new(f) }
    }

    /// Decodes `input`.
    pub fn decode(&self, input: &Value) -> M::Validated<A> {
        (self.run)(input)
    }

    /// Transforms the decoded value. Errors are untouched.
    pub fn map<B, F>(self, f: F) -> Decoder<M, B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Decoder::new(move |input| {
            let f = Arc::clone(&f);
            M::map(self.decode(input), move |a| f(a))
        })
    }

    /// Post-processes the decoded value with a step that may fail.
    ///
    /// The step's own error tree surfaces unchanged.
    pub fn parse<B, F>(self, f: F) -> Decoder<M, B>
    where
        B: Send + 'static,
        F: Fn(A) -> M::Validated<B> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Decoder::new(move |input| {
            let f = Arc::clone(&f);
            M::and_then(self.decode(input), move |a| f(a))
        })
    }

    /// Re-validates the decoded value.
    ///
    /// When `predicate` rejects it, the structural context is dropped and a
    /// fresh `Leaf(value, id)` is reported instead.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::sync;
    /// use serde_json::json;
    ///
    /// let positive = sync::number().refine(|n| *n > 0.0, "Positive");
    /// let error = positive.decode(&json!(-1)).into_result().unwrap_err();
    /// assert_eq!(error.to_string(), "cannot decode -1, should be Positive");
    /// ```
    pub fn refine<P>(self, predicate: P, id: impl Into<String>) -> Decoder<M, A>
    where
        A: Serialize,
        P: Fn(&A) -> bool + Send + Sync + 'static,
    {
        let id: Arc<str> = Arc::from(id.into());
        self.parse(move |a| {
            if predicate(&a) {
                M::success(a)
            } else {
                M::failure(DecodeError::leaf(to_actual(&a), &*id))
            }
        })
    }

    /// Falls back to the decoder produced by `that` when this one fails.
    ///
    /// If both fail, both errors are reported, this decoder's first.
    pub fn alt<F>(self, that: F) -> Decoder<M, A>
    where
        F: Fn() -> Decoder<M, A> + Send + Sync + 'static,
    {
        let that = Arc::new(that);
        Decoder::new(move |input| {
            let that = Arc::clone(&that);
            let fallback_input = input.clone();
            M::alt(self.decode(input), move || that().decode(&fallback_input))
        })
    }

    /// Rewrites the error tree of a failed decode, with access to the input.
    pub fn map_left_with_input<F>(self, f: F) -> Decoder<M, A>
    where
        F: Fn(&Value, DecodeError) -> DecodeError + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Decoder::new(move |input| {
            let f = Arc::clone(&f);
            let actual = input.clone();
            M::map_err(self.decode(input), move |e| f(&actual, e))
        })
    }

    /// Erases the output type to a JSON value.
    ///
    /// Used to put decoders of different output types side by side, e.g. as
    /// the fields of one [`type_`] schema.
    pub fn erase(self) -> Decoder<M, Value>
    where
        A: Serialize,
    {
        self.map(|a| to_actual(&a))
    }
}

impl<M: Effect> Decoder<M, Value> {
    /// Feeds the output of this decoder into `next`.
    pub fn compose<B>(self, next: Decoder<M, B>) -> Decoder<M, B>
    where
        B: Send + 'static,
    {
        self.parse(move |value| next.decode(&value))
    }
}

/// A decoder that ignores its input and always succeeds with `value`.
pub fn success<M, A>(value: A) -> Decoder<M, A>
where
    M: Effect,
    A: Clone + Send + Sync + 'static,
{
    Decoder::new(move |_| M::success(value.clone()))
}

/// A decoder that always fails with `Leaf(input, message)`.
pub fn failure<M, A>(message: impl Into<String>) -> Decoder<M, A>
where
    M: Effect,
    A: Send + 'static,
{
    let message: Arc<str> = Arc::from(message.into());
    Decoder::new(move |input| M::failure(DecodeError::leaf(input.clone(), &*message)))
}

/// Defines a decoder that may refer to itself.
///
/// `f` receives a handle to the decoder being defined and returns its body.
/// It is not called until the first decode, and its result is cached, so a
/// recursive schema is built once no matter how deeply its inputs nest.
/// Failures are wrapped in `Lazy(id, err)` at every level of recursion.
///
/// The handle holds only a weak reference to the cached body, so dropping
/// the last clone of the returned decoder releases the whole schema. A
/// handle decoded after that fails with `Lazy(id, Leaf(input, id))`.
///
/// `f` must not decode with the handle while it runs; forcing is not
/// reentrant.
///
/// # Example
///
/// ```rust
/// use schemata::{array, intersect, lazy, partial, sync, type_, SyncDecoder};
/// use serde_json::{json, Value};
///
/// let category: SyncDecoder<Value> = lazy("Category", |category: &SyncDecoder<Value>| {
///     intersect(
///         type_([("title", sync::string().erase())]),
///         partial([("children", array(category.clone()).erase())]),
///     )
///     .erase()
/// });
///
/// let input = json!({"title": "a", "children": [{"title": "b"}]});
/// assert!(category.decode(&input).is_success());
/// ```
pub fn lazy<M, A, F>(id: impl Into<String>, f: F) -> Decoder<M, A>
where
    M: Effect,
    A: Send + 'static,
    F: Fn(&Decoder<M, A>) -> Decoder<M, A> + Send + Sync + 'static,
{
    let state = Arc::new(LazyState {
        id: Arc::from(id.into()),
        body: Box::new(f),
        cell: OnceLock::new(),
    });

    Decoder::new(move |input| decode_lazy(&state, input))
}

struct LazyState<M: Effect, A: Send + 'static> {
    id: Arc<str>,
    body: Box<dyn Fn(&Decoder<M, A>) -> Decoder<M, A> + Send + Sync>,
    cell: OnceLock<Decoder<M, A>>,
}

fn decode_lazy<M, A>(state: &Arc<LazyState<M, A>>, input: &Value) -> M::Validated<A>
where
    M: Effect,
    A: Send + 'static,
{
    let decoder = state.cell.get_or_init(|| {
        tracing::trace!(id = %state.id, "forcing lazy decoder");
        (state.body)(&self_handle(state))
    });
    let id = Arc::clone(&state.id);
    M::map_err(decoder.decode(input), move |e| DecodeError::lazy(&*id, e))
}

// The cached body owns this handle, so it must not keep the state alive.
fn self_handle<M, A>(state: &Arc<LazyState<M, A>>) -> Decoder<M, A>
where
    M: Effect,
    A: Send + 'static,
{
    let weak: Weak<LazyState<M, A>> = Arc::downgrade(state);
    let id = Arc::clone(&state.id);
    Decoder::new(move |input| match weak.upgrade() {
        Some(state) => decode_lazy(&state, input),
        None => M::failure(DecodeError::lazy(&*id, DecodeError::leaf(input.clone(), &*id))),
    })
}

/// Converts a decoded value back to JSON for error reporting and erasure.
///
/// Integral floats are written back as integers, so a decoded `1` reads `1`
/// again rather than `1.0`. A value that cannot be serialized is reported as
/// a string holding the serde error.
pub(crate) fn to_actual<A: Serialize>(value: &A) -> Value {
    match serde_json::to_value(value) {
        Ok(mut json) => {
            integral_numbers(&mut json);
            json
        }
        Err(e) => Value::String(format!("<unserializable value: {e}>")),
    }
}

fn integral_numbers(value: &mut Value) {
    let mut stack = vec![value];
    while let Some(value) = stack.pop() {
        if let Value::Number(n) = &*value {
            if let Some(integer) = as_integer(n) {
                *value = integer;
            }
            continue;
        }
        match value {
            Value::Array(items) => stack.extend(items.iter_mut()),
            Value::Object(entries) => stack.extend(entries.values_mut()),
            _ => {}
        }
    }
}

fn as_integer(n: &Number) -> Option<Value> {
    if !n.is_f64() {
        return None;
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(Value::from(f as i64))
    } else {
        None
    }
}

/// Renders values as JSON, joined the way literal alternatives are listed.
pub(crate) fn join_alternatives<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a Value>,
{
    values
        .into_iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}
