//! Validation effects.
//!
//! An [`Effect`] describes how a decode result is carried: produced right away
//! ([`Immediate`]) or as a future the caller drives ([`Task`], behind the
//! `task` feature). Every combinator in [`crate::decoder`] is written once
//! against this trait.
//!
//! All operations that combine two results accumulate errors: when both sides
//! fail, the failures are concatenated left to right rather than the second
//! one being dropped.

mod immediate;
#[cfg(feature = "task")]
mod task;

pub use immediate::Immediate;
#[cfg(feature = "task")]
pub use task::{Suspend, Task};

use stillwater::Validation;

use crate::error::DecodeError;
use crate::DecodeResult;

/// A computation that yields either a value or a [`DecodeError`].
///
/// Implementors are zero-sized markers; the carried result type is
/// [`Effect::Validated`].
pub trait Effect: Sized + Send + Sync + 'static {
    /// The carrier of a result of type `A`.
    type Validated<A: Send + 'static>: Send + 'static;

    /// Lifts an already-known result.
    fn from_validation<A: Send + 'static>(result: DecodeResult<A>) -> Self::Validated<A>;

    /// Lifts a success.
    fn success<A: Send + 'static>(value: A) -> Self::Validated<A> {
        Self::from_validation(Validation::Success(value))
    }

    /// Lifts a failure.
    fn failure<A: Send + 'static>(error: DecodeError) -> Self::Validated<A> {
        Self::from_validation(Validation::Failure(error))
    }

    /// Transforms a success; failures pass through untouched.
    fn map<A, B, F>(fa: Self::Validated<A>, f: F) -> Self::Validated<B>
    where
        A: Send + 'static,
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static;

    /// Transforms a failure; successes pass through untouched.
    fn map_err<A, F>(fa: Self::Validated<A>, f: F) -> Self::Validated<A>
    where
        A: Send + 'static,
        F: FnOnce(DecodeError) -> DecodeError + Send + 'static;

    /// Post-processes a success with a step that may itself fail.
    fn and_then<A, B, F>(fa: Self::Validated<A>, f: F) -> Self::Validated<B>
    where
        A: Send + 'static,
        B: Send + 'static,
        F: FnOnce(A) -> Self::Validated<B> + Send + 'static;

    /// Combines two independent results, accumulating both errors.
    fn zip<A, B>(fa: Self::Validated<A>, fb: Self::Validated<B>) -> Self::Validated<(A, B)>
    where
        A: Send + 'static,
        B: Send + 'static;

    /// Combines many independent results in order, accumulating every error.
    fn sequence<A>(items: Vec<Self::Validated<A>>) -> Self::Validated<Vec<A>>
    where
        A: Send + 'static;

    /// Falls back to `that` when `fa` fails.
    ///
    /// If the fallback fails too, the result carries both errors, `fa`'s first.
    fn alt<A, F>(fa: Self::Validated<A>, that: F) -> Self::Validated<A>
    where
        A: Send + 'static,
        F: FnOnce() -> Self::Validated<A> + Send + 'static;
}
