//! Capability traits for schema-generic tooling.
//!
//! A schema written once against these traits can be interpreted by any
//! implementor. Both effect markers implement every capability, with
//! `Of<A> = Decoder<M, A>`, so the same schema function yields an immediate
//! or a suspendable decoder depending on the type parameter it is called
//! with.
//!
//! # Example
//!
//! ```rust
//! use indexmap::IndexMap;
//! use schemata::schemable::{Schemable, WithUnion};
//! use schemata::Immediate;
//! use serde_json::{json, Value};
//!
//! fn user<S: Schemable + WithUnion>() -> S::Of<IndexMap<String, Value>> {
//!     let text = || S::map(S::string(), |s: String| Value::from(s));
//!     let number = || S::map(S::number(), |n: f64| Value::from(n));
//!
//!     S::type_::<Value>(vec![
//!         ("name".to_string(), text()),
//!         ("id".to_string(), S::union::<Value>(vec![text(), number()])),
//!     ])
//! }
//!
//! let decoder = user::<Immediate>();
//! assert!(decoder.decode(&json!({"name": "a", "id": 7})).is_success());
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::decoder::{self, Decoder, Intersect};
use crate::effect::Effect;

/// An interpreter whose schemas can be mapped over.
pub trait Functor {
    /// The interpretation of a schema that describes an `A`.
    ///
    /// Interpretations are cheap handles, so recursive schemas can clone the
    /// one they are defining.
    type Of<A: Send + 'static>: Clone;

    /// Transforms what the schema produces.
    fn map<A, B, F>(fa: Self::Of<A>, f: F) -> Self::Of<B>
    where
        A: Send + 'static,
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static;
}

/// An interpreter with a fallback between two schemas of the same type.
pub trait Alt: Functor {
    /// Uses `that` when `fa` does not apply.
    fn alt<A, F>(fa: Self::Of<A>, that: F) -> Self::Of<A>
    where
        A: Send + 'static,
        F: Fn() -> Self::Of<A> + Send + Sync + 'static;
}

/// The core schema vocabulary.
pub trait Schemable: Functor {
    /// Accepts exactly one of `values`.
    fn literal<V: Into<Value>>(values: Vec<V>) -> Self::Of<Value>;

    /// Any string.
    fn string() -> Self::Of<String>;

    /// Any number.
    fn number() -> Self::Of<f64>;

    /// Either boolean.
    fn boolean() -> Self::Of<bool>;

    /// `null`, or whatever `or` accepts.
    fn nullable<A: Send + 'static>(or: Self::Of<A>) -> Self::Of<Option<A>>;

    /// An object whose listed fields are all required.
    fn type_<A: Send + 'static>(
        fields: Vec<(String, Self::Of<A>)>,
    ) -> Self::Of<IndexMap<String, A>>;

    /// An object whose listed fields may be absent.
    fn partial<A: Send + 'static>(
        fields: Vec<(String, Self::Of<A>)>,
    ) -> Self::Of<IndexMap<String, A>>;

    /// An object with arbitrary keys whose values all match `codomain`.
    fn record<A: Send + 'static>(codomain: Self::Of<A>) -> Self::Of<IndexMap<String, A>>;

    /// An array whose elements all match `item`.
    fn array<A: Send + 'static>(item: Self::Of<A>) -> Self::Of<Vec<A>>;

    /// A fixed-length array, one schema per position.
    fn tuple<A: Send + 'static>(components: Vec<Self::Of<A>>) -> Self::Of<Vec<A>>;

    /// Both schemas at once, with their results merged.
    fn intersect<A: Intersect + Send + 'static>(
        left: Self::Of<A>,
        right: Self::Of<A>,
    ) -> Self::Of<A>;

    /// A tagged union, dispatched on the string field `tag`.
    fn sum<A: Send + 'static>(tag: &str, members: Vec<(String, Self::Of<A>)>) -> Self::Of<A>;

    /// A schema that may refer to itself.
    ///
    /// `f` receives the schema being defined and is evaluated once, on first
    /// use.
    fn lazy<A, F>(id: &str, f: F) -> Self::Of<A>
    where
        A: Send + 'static,
        F: Fn(&Self::Of<A>) -> Self::Of<A> + Send + Sync + 'static;
}

/// Schemas for containers whose contents are left untyped.
pub trait WithUnknownContainers: Schemable {
    /// Any array.
    fn unknown_array() -> Self::Of<Vec<Value>>;

    /// Any object.
    fn unknown_record() -> Self::Of<Map<String, Value>>;
}

/// Untagged unions.
pub trait WithUnion: Schemable {
    /// The first of `members` that applies.
    ///
    /// # Panics
    ///
    /// Implementations may panic when `members` is empty.
    fn union<A: Send + 'static>(members: Vec<Self::Of<A>>) -> Self::Of<A>;
}

/// Refinement of a schema by a predicate.
pub trait WithRefine: Schemable {
    /// Narrows `from` to the values `predicate` accepts, naming the result `id`.
    fn refine<A, P>(from: Self::Of<A>, predicate: P, id: &str) -> Self::Of<A>
    where
        A: Serialize + Send + 'static,
        P: Fn(&A) -> bool + Send + Sync + 'static;
}

impl<M: Effect> Functor for M {
    type Of<A: Send + 'static> = Decoder<M, A>;

    fn map<A, B, F>(fa: Decoder<M, A>, f: F) -> Decoder<M, B>
    where
        A: Send + 'static,
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        fa.map(f)
    }
}

impl<M: Effect> Alt for M {
    fn alt<A, F>(fa: Decoder<M, A>, that: F) -> Decoder<M, A>
    where
        A: Send + 'static,
        F: Fn() -> Decoder<M, A> + Send + Sync + 'static,
    {
        fa.alt(that)
    }
}

impl<M: Effect> Schemable for M {
    fn literal<V: Into<Value>>(values: Vec<V>) -> Decoder<M, Value> {
        decoder::literal(values)
    }

    fn string() -> Decoder<M, String> {
        decoder::string()
    }

    fn number() -> Decoder<M, f64> {
        decoder::number()
    }

    fn boolean() -> Decoder<M, bool> {
        decoder::boolean()
    }

    fn nullable<A: Send + 'static>(or: Decoder<M, A>) -> Decoder<M, Option<A>> {
        decoder::nullable(or)
    }

    fn type_<A: Send + 'static>(
        fields: Vec<(String, Decoder<M, A>)>,
    ) -> Decoder<M, IndexMap<String, A>> {
        decoder::type_(fields)
    }

    fn partial<A: Send + 'static>(
        fields: Vec<(String, Decoder<M, A>)>,
    ) -> Decoder<M, IndexMap<String, A>> {
        decoder::partial(fields)
    }

    fn record<A: Send + 'static>(codomain: Decoder<M, A>) -> Decoder<M, IndexMap<String, A>> {
        decoder::record(codomain)
    }

    fn array<A: Send + 'static>(item: Decoder<M, A>) -> Decoder<M, Vec<A>> {
        decoder::array(item)
    }

    fn tuple<A: Send + 'static>(components: Vec<Decoder<M, A>>) -> Decoder<M, Vec<A>> {
        decoder::tuple(components)
    }

    fn intersect<A: Intersect + Send + 'static>(
        left: Decoder<M, A>,
        right: Decoder<M, A>,
    ) -> Decoder<M, A> {
        decoder::intersect(left, right)
    }

    fn sum<A: Send + 'static>(tag: &str, members: Vec<(String, Decoder<M, A>)>) -> Decoder<M, A> {
        decoder::sum(tag, members)
    }

    fn lazy<A, F>(id: &str, f: F) -> Decoder<M, A>
    where
        A: Send + 'static,
        F: Fn(&Decoder<M, A>) -> Decoder<M, A> + Send + Sync + 'static,
    {
        decoder::lazy(id, f)
    }
}

impl<M: Effect> WithUnknownContainers for M {
    fn unknown_array() -> Decoder<M, Vec<Value>> {
        decoder::unknown_array()
    }

    fn unknown_record() -> Decoder<M, Map<String, Value>> {
        decoder::unknown_record()
    }
}

impl<M: Effect> WithUnion for M {
    fn union<A: Send + 'static>(members: Vec<Decoder<M, A>>) -> Decoder<M, A> {
        decoder::union(members)
    }
}

impl<M: Effect> WithRefine for M {
    fn refine<A, P>(from: Decoder<M, A>, predicate: P, id: &str) -> Decoder<M, A>
    where
        A: Serialize + Send + 'static,
        P: Fn(&A) -> bool + Send + Sync + 'static,
    {
        from.refine(predicate, id)
    }
}
