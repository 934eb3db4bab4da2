//! The immediate effect: results are plain `stillwater::Validation` values.

use stillwater::{Semigroup, Validation};

use crate::error::DecodeError;
use crate::DecodeResult;

use super::Effect;

/// Synchronous decoding; `decode` returns its result directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Effect for Immediate {
    type Validated<A: Send + 'static> = DecodeResult<A>;

    fn from_validation<A: Send + 'static>(result: DecodeResult<A>) -> DecodeResult<A> {
        result
    }

    fn map<A, B, F>(fa: DecodeResult<A>, f: F) -> DecodeResult<B>
    where
        A: Send + 'static,
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        match fa {
            Validation::Success(a) => Validation::Success(f(a)),
            Validation::Failure(e) => Validation::Failure(e),
        }
    }

    fn map_err<A, F>(fa: DecodeResult<A>, f: F) -> DecodeResult<A>
    where
        A: Send + 'static,
        F: FnOnce(DecodeError) -> DecodeError + Send + 'static,
    {
        match fa {
            Validation::Success(a) => Validation::Success(a),
            Validation::Failure(e) => Validation::Failure(f(e)),
        }
    }

    fn and_then<A, B, F>(fa: DecodeResult<A>, f: F) -> DecodeResult<B>
    where
        A: Send + 'static,
        B: Send + 'static,
        F: FnOnce(A) -> DecodeResult<B> + Send + 'static,
    {
        match fa {
            Validation::Success(a) => f(a),
            Validation::Failure(e) => Validation::Failure(e),
        }
    }

    fn zip<A, B>(fa: DecodeResult<A>, fb: DecodeResult<B>) -> DecodeResult<(A, B)>
    where
        A: Send + 'static,
        B: Send + 'static,
    {
        match (fa, fb) {
            (Validation::Success(a), Validation::Success(b)) => Validation::Success((a, b)),
            (Validation::Failure(e1), Validation::Failure(e2)) => {
                Validation::Failure(e1.combine(e2))
            }
            (Validation::Failure(e), _) | (_, Validation::Failure(e)) => Validation::Failure(e),
        }
    }

    fn sequence<A>(items: Vec<DecodeResult<A>>) -> DecodeResult<Vec<A>>
    where
        A: Send + 'static,
    {
        let mut values = Vec::with_capacity(items.len());
        let mut errors = Vec::new();

        for item in items {
            match item {
                Validation::Success(a) if errors.is_empty() => values.push(a),
                Validation::Success(_) => {}
                Validation::Failure(e) => errors.push(e),
            }
        }

        match DecodeError::concat_all(errors) {
            Some(error) => Validation::Failure(error),
            None => Validation::Success(values),
        }
    }

    fn alt<A, F>(fa: DecodeResult<A>, that: F) -> DecodeResult<A>
    where
        A: Send + 'static,
        F: FnOnce() -> DecodeResult<A> + Send + 'static,
    {
        match fa {
            Validation::Success(a) => Validation::Success(a),
            Validation::Failure(e1) => match that() {
                Validation::Success(a) => Validation::Success(a),
                Validation::Failure(e2) => Validation::Failure(e1.combine(e2)),
            },
        }
    }
}
