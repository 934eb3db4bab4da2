//! The immediate decoder flavor.
//!
//! [`SyncDecoder`] is the generic [`Decoder`] instantiated with the
//! [`Immediate`] effect: `decode` returns a `stillwater::Validation` right
//! away.
//!
//! # Example
//!
//! ```rust
//! use schemata::{sync, type_};
//! use serde_json::json;
//!
//! let decoder = type_([("name", sync::string()), ("email", sync::string())]);
//!
//! let result = decoder.decode(&json!({"name": "Alice", "email": "a@example.com"}));
//! assert!(result.is_success());
//! ```

use rayon::prelude::*;
use serde_json::{Map, Value};

use crate::decoder::{self, Decoder};
use crate::effect::Immediate;
use crate::DecodeResult;

/// A decoder whose results are available immediately.
pub type SyncDecoder<A> = Decoder<Immediate, A>;

/// Decodes a JSON string.
pub fn string() -> SyncDecoder<String> {
    decoder::string()
}

/// Decodes a JSON number as `f64`.
pub fn number() -> SyncDecoder<f64> {
    decoder::number()
}

/// Decodes a JSON boolean.
pub fn boolean() -> SyncDecoder<bool> {
    decoder::boolean()
}

/// Decodes any JSON array, leaving its elements untyped.
pub fn unknown_array() -> SyncDecoder<Vec<Value>> {
    decoder::unknown_array()
}

/// Decodes any JSON object, leaving its entries untyped.
pub fn unknown_record() -> SyncDecoder<Map<String, Value>> {
    decoder::unknown_record()
}

impl<A: Send + 'static> Decoder<Immediate, A> {
    /// Decodes many independent inputs in parallel.
    ///
    /// Results are returned in the order of `inputs`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::sync;
    /// use serde_json::json;
    ///
    /// let inputs = vec![json!(1), json!("two"), json!(3)];
    /// let results = sync::number().decode_batch(&inputs);
    ///
    /// assert!(results[0].is_success());
    /// assert!(results[1].is_failure());
    /// assert!(results[2].is_success());
    /// ```
    pub fn decode_batch(&self, inputs: &[Value]) -> Vec<DecodeResult<A>> {
        tracing::debug!(inputs = inputs.len(), "decoding batch");
        inputs.par_iter().map(|input| self.decode(input)).collect()
    }
}
