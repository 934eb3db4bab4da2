//! The suspendable effect: results are boxed futures driven by the caller.
//!
//! Combining results never spawns; sibling results are joined so they make
//! progress together when polled, and their errors are concatenated in
//! declaration order regardless of which one finishes first.

use std::future::Future;

use futures::future::{self, BoxFuture, FutureExt};
use stillwater::Validation;

use crate::error::DecodeError;
use crate::DecodeResult;

use super::{Effect, Immediate};

/// Asynchronous decoding; `decode` returns a not-yet-run future.
#[derive(Debug, Clone, Copy, Default)]
pub struct Task;

/// Effects that can embed a suspended computation.
///
/// Only [`Task`] has this capability; it is what lets a `parse` or `refine`
/// step wait on external state.
pub trait Suspend: Effect {
    /// Embeds a future producing a decode result.
    fn suspend<A, Fut>(fut: Fut) -> Self::Validated<A>
    where
        A: Send + 'static,
        Fut: Future<Output = DecodeResult<A>> + Send + 'static;
}

impl Effect for Task {
    type Validated<A: Send + 'static> = BoxFuture<'static, DecodeResult<A>>;

    fn from_validation<A: Send + 'static>(result: DecodeResult<A>) -> Self::Validated<A> {
        future::ready(result).boxed()
    }

    fn map<A, B, F>(fa: Self::Validated<A>, f: F) -> Self::Validated<B>
    where
        A: Send + 'static,
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        fa.map(move |result| Immediate::map(result, f)).boxed()
    }

    fn map_err<A, F>(fa: Self::Validated<A>, f: F) -> Self::Validated<A>
    where
        A: Send + 'static,
        F: FnOnce(DecodeError) -> DecodeError + Send + 'static,
    {
        fa.map(move |result| Immediate::map_err(result, f)).boxed()
    }

    fn and_then<A, B, F>(fa: Self::Validated<A>, f: F) -> Self::Validated<B>
    where
        A: Send + 'static,
        B: Send + 'static,
        F: FnOnce(A) -> Self::Validated<B> + Send + 'static,
    {
        async move {
            match fa.await {
                Validation::Success(a) => f(a).await,
                Validation::Failure(e) => Validation::Failure(e),
            }
        }
        .boxed()
    }

    fn zip<A, B>(fa: Self::Validated<A>, fb: Self::Validated<B>) -> Self::Validated<(A, B)>
    where
        A: Send + 'static,
        B: Send + 'static,
    {
        future::join(fa, fb)
            .map(|(a, b)| Immediate::zip(a, b))
            .boxed()
    }

    fn sequence<A>(items: Vec<Self::Validated<A>>) -> Self::Validated<Vec<A>>
    where
        A: Send + 'static,
    {
        future::join_all(items)
            .map(|results| Immediate::sequence(results))
            .boxed()
    }

    fn alt<A, F>(fa: Self::Validated<A>, that: F) -> Self::Validated<A>
    where
        A: Send + 'static,
        F: FnOnce() -> Self::Validated<A> + Send + 'static,
    {
        async move {
            match fa.await {
                Validation::Success(a) => Validation::Success(a),
                Validation::Failure(e1) => match that().await {
                    Validation::Success(a) => Validation::Success(a),
                    Validation::Failure(e2) => Validation::Failure(e1.concat(e2)),
                },
            }
        }
        .boxed()
    }
}

impl Suspend for Task {
    fn suspend<A, Fut>(fut: Fut) -> Self::Validated<A>
    where
        A: Send + 'static,
        Fut: Future<Output = DecodeResult<A>> + Send + 'static,
    {
        fut.boxed()
    }
}
