//! # Schemata
//!
//! Schema-driven decoders that turn untyped JSON into typed values and, when
//! that fails, report ALL failures as a structured error tree rather than
//! stopping at the first one.
//!
//! ## Overview
//!
//! A decoder is built by composing combinators: primitives, object and array
//! shapes, unions, intersections, tagged sums and recursive (lazy) schemas.
//! Decoding yields a `stillwater::Validation`. On failure, the
//! [`DecodeError`] tree records where each mismatch happened (which property,
//! which index, which union branch, which recursive type) and can be drawn as
//! an indented text tree with [`draw`].
//!
//! Every combinator is written once over an [`effect::Effect`] and comes in two
//! flavors:
//!
//! - [`sync`]: results are available immediately.
//! - [`task`] (feature `task`, on by default): results are futures, so a
//!   schema can contain asynchronous parse or refine steps.
//!
//! ## Core Types
//!
//! - [`Decoder`]: a decoder over effect `M` producing an `A`
//! - [`DecodeError`]: a non-empty, ordered tree of [`ErrorNode`]s
//! - [`guard::Guard`]: primitive type-guards decoders are built from
//! - [`schemable`]: capability traits for schema-generic tooling
//!
//! ## Example
//!
//! ```rust
//! use schemata::{array, sync, type_};
//! use serde_json::json;
//!
//! let decoder = type_([
//!     ("name", sync::string().erase()),
//!     ("tags", array(sync::string()).erase()),
//! ]);
//!
//! let result = decoder.decode(&json!({"name": "a", "tags": ["x", 1]}));
//! let error = result.into_result().unwrap_err();
//!
//! assert_eq!(
//!     error.to_string(),
//!     [
//!         r#"required property "tags""#,
//!         "└─ optional index 1",
//!         "   └─ cannot decode 1, should be string",
//!     ]
//!     .join("\n")
//! );
//! ```

pub mod decoder;
pub mod draw;
pub mod effect;
pub mod error;
pub mod guard;
pub mod schemable;
pub mod sync;

#[cfg(feature = "task")]
pub mod task;

pub use decoder::{
    array, failure, from_guard, intersect, lazy, literal, nullable, partial, record, success, sum,
    tuple, tuple2, tuple3, type_, union, Decoder, Intersect,
};
pub use draw::{draw, stringify};
pub use effect::{Effect, Immediate};
#[cfg(feature = "task")]
pub use effect::{Suspend, Task};
pub use error::{DecodeError, ErrorNode, Kind};
pub use sync::SyncDecoder;
#[cfg(feature = "task")]
pub use task::TaskDecoder;

/// Type alias for decode results.
pub type DecodeResult<A> = stillwater::Validation<A, DecodeError>;
