//! Primitive type-guards.
//!
//! A [`Guard`] answers "is this untyped value an `A`?" and, when it is, hands
//! back the narrowed value. Decoders built with [`crate::from_guard`] turn a
//! failed guard into a leaf error.

use serde_json::{Map, Value};

/// A type-guard over untyped JSON values.
///
/// Any `Fn(&Value) -> bool` is a guard that narrows to the value itself.
///
/// # Example
///
/// ```rust
/// use schemata::guard::{Guard, StringGuard};
/// use serde_json::json;
///
/// assert_eq!(StringGuard.guard(&json!("a")), Some("a".to_string()));
/// assert!(!StringGuard.is(&json!(1)));
///
/// let positive = |v: &serde_json::Value| v.as_f64().is_some_and(|n| n > 0.0);
/// assert!(positive.is(&json!(3)));
/// ```
pub trait Guard<A>: Send + Sync {
    /// Returns the narrowed value if `value` passes the guard.
    fn guard(&self, value: &Value) -> Option<A>;

    /// Returns true if `value` passes the guard.
    fn is(&self, value: &Value) -> bool {
        self.guard(value).is_some()
    }
}

impl<F> Guard<Value> for F
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn guard(&self, value: &Value) -> Option<Value> {
        self(value).then(|| value.clone())
    }

    fn is(&self, value: &Value) -> bool {
        self(value)
    }
}

/// Passes JSON strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringGuard;

impl Guard<String> for StringGuard {
    fn guard(&self, value: &Value) -> Option<String> {
        value.as_str().map(str::to_owned)
    }

    fn is(&self, value: &Value) -> bool {
        value.is_string()
    }
}

/// Passes JSON numbers, integral or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberGuard;

impl Guard<f64> for NumberGuard {
    fn guard(&self, value: &Value) -> Option<f64> {
        value.as_f64()
    }

    fn is(&self, value: &Value) -> bool {
        value.is_number()
    }
}

/// Passes JSON booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanGuard;

impl Guard<bool> for BooleanGuard {
    fn guard(&self, value: &Value) -> Option<bool> {
        value.as_bool()
    }

    fn is(&self, value: &Value) -> bool {
        value.is_boolean()
    }
}

/// Passes any JSON array, without looking at its elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownArrayGuard;

impl Guard<Vec<Value>> for UnknownArrayGuard {
    fn guard(&self, value: &Value) -> Option<Vec<Value>> {
        value.as_array().cloned()
    }

    fn is(&self, value: &Value) -> bool {
        value.is_array()
    }
}

/// Passes any JSON object, without looking at its entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownRecordGuard;

impl Guard<Map<String, Value>> for UnknownRecordGuard {
    fn guard(&self, value: &Value) -> Option<Map<String, Value>> {
        value.as_object().cloned()
    }

    fn is(&self, value: &Value) -> bool {
        value.is_object()
    }
}
