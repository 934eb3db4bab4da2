//! The suspendable decoder flavor.
//!
//! [`TaskDecoder`] is the generic [`Decoder`] instantiated with the [`Task`]
//! effect: `decode` returns a future that does nothing until the caller drives
//! it. The combinators are the same ones the immediate flavor uses; only
//! `parse`/`refine` steps supplied by the caller ever suspend.
//!
//! # Example
//!
//! ```rust
//! use futures::executor::block_on;
//! use schemata::{task, type_};
//! use serde_json::json;
//!
//! let decoder = type_([("name", task::string())]);
//!
//! let result = block_on(decoder.decode(&json!({"name": "Alice"})));
//! assert!(result.is_success());
//! ```

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::decoder::{to_actual, Decoder};
use crate::effect::{Effect, Immediate, Suspend, Task};
use crate::error::DecodeError;
use crate::sync::{self, SyncDecoder};
use crate::DecodeResult;

/// A decoder whose results are futures driven by the caller.
pub type TaskDecoder<A> = Decoder<Task, A>;

/// Lifts an immediate decoder; its result becomes an already-completed future.
pub fn from_decoder<A: Send + 'static>(decoder: SyncDecoder<A>) -> TaskDecoder<A> {
    Decoder::new(move |input| Task::from_validation(decoder.decode(input)))
}

/// Decodes a JSON string.
pub fn string() -> TaskDecoder<String> {
    from_decoder(sync::string())
}

/// Decodes a JSON number as `f64`.
pub fn number() -> TaskDecoder<f64> {
    from_decoder(sync::number())
}

/// Decodes a JSON boolean.
pub fn boolean() -> TaskDecoder<bool> {
    from_decoder(sync::boolean())
}

/// Decodes any JSON array, leaving its elements untyped.
pub fn unknown_array() -> TaskDecoder<Vec<Value>> {
    from_decoder(sync::unknown_array())
}

/// Decodes any JSON object, leaving its entries untyped.
pub fn unknown_record() -> TaskDecoder<Map<String, Value>> {
    from_decoder(sync::unknown_record())
}

impl<A: Send + 'static> Decoder<Immediate, A> {
    /// Converts this decoder into the suspendable flavor.
    pub fn into_task(self) -> TaskDecoder<A> {
        from_decoder(self)
    }
}

impl<A: Send + 'static> Decoder<Task, A> {
    /// Post-processes the decoded value with an asynchronous step.
    ///
    /// # Example
    ///
    /// ```rust
    /// use futures::executor::block_on;
    /// use schemata::{task, DecodeError};
    /// use serde_json::json;
    /// use stillwater::Validation;
    ///
    /// let trimmed = task::string().parse_async(|s| async move {
    ///     if s.trim().is_empty() {
    ///         Validation::Failure(DecodeError::leaf(json!(s), "NonBlank"))
    ///     } else {
    ///         Validation::Success(s.trim().to_string())
    ///     }
    /// });
    ///
    /// let result = block_on(trimmed.decode(&json!("  hi ")));
    /// assert_eq!(result.into_result().unwrap(), "hi");
    /// ```
    pub fn parse_async<B, F, Fut>(self, f: F) -> TaskDecoder<B>
    where
        B: Send + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = DecodeResult<B>> + Send + 'static,
    {
        self.parse(move |a| Task::suspend(f(a)))
    }

    /// Re-validates the decoded value with an asynchronous predicate, such as
    /// a uniqueness check against external state.
    ///
    /// A rejected value is reported as a fresh `Leaf(value, id)`.
    pub fn refine_async<P, Fut>(self, predicate: P, id: impl Into<String>) -> TaskDecoder<A>
    where
        A: Serialize,
        P: Fn(&A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let id: Arc<str> = Arc::from(id.into());
        self.parse_async(move |a| {
            let verdict = predicate(&a);
            let id = Arc::clone(&id);
            async move {
                if verdict.await {
                    Validation::Success(a)
                } else {
                    Validation::Failure(DecodeError::leaf(to_actual(&a), &*id))
                }
            }
        })
    }
}

/// Awaits a decode result and renders it with [`crate::draw::stringify`].
///
/// # Example
///
/// ```rust
/// use futures::executor::block_on;
/// use schemata::task;
/// use serde_json::json;
///
/// let rendered = block_on(task::stringify(task::number().decode(&json!("1"))));
/// assert_eq!(rendered, "cannot decode \"1\", should be number");
/// ```
pub fn stringify<A, Fut>(result: Fut) -> impl Future<Output = String> + Send
where
    A: Serialize,
    Fut: Future<Output = DecodeResult<A>> + Send,
{
    async move { crate::draw::stringify(&result.await) }
}
