//! Error types for decoding failures.
//!
//! This module provides the closed set of [`ErrorNode`] variants that describe
//! *where* in a schema a failure happened, and the [`DecodeError`] tree that
//! accumulates them without losing or reordering any.

mod node;
mod tree;

pub use node::{ErrorNode, Kind};
pub use tree::{DecodeError, Iter};
