//! Presence and shape checks.

use crate::error::ValidationError;
use crate::rule::{rule_fn, Outcome, RuleRef};
use crate::value::Value;

/// The value must be present and non-empty: rejects nil, the empty string,
/// and empty lists, maps, and records. `0` and `false` pass.
pub fn required() -> RuleRef {
    rule_fn(|_ctx, value, _root| {
        if value.is_empty() {
            Outcome::fail(
                value,
                ValidationError::new("required", "field is required and cannot be empty"),
            )
        } else {
            Outcome::pass(value)
        }
    })
}

/// The value must not be nil; empty containers pass.
pub fn not_null() -> RuleRef {
    rule_fn(|_ctx, value, _root| {
        if value.is_null() {
            Outcome::fail(value, ValidationError::new("not_null", "must not be null"))
        } else {
            Outcome::pass(value)
        }
    })
}

fn shape(kind: &'static str, expected: &'static str, pred: fn(&Value) -> bool) -> RuleRef {
    rule_fn(move |_ctx, value, _root| {
        if pred(&value) {
            Outcome::pass(value)
        } else {
            let message = format!("must be {}, got {}", expected, value.type_name());
            Outcome::fail(value, ValidationError::new(kind, message))
        }
    })
}

/// The value must be a string.
pub fn is_string() -> RuleRef {
    shape("is_string", "a string", |v| matches!(v, Value::Str(_)))
}

/// The value must be an integer.
pub fn is_int() -> RuleRef {
    shape("is_int", "an integer", |v| matches!(v, Value::Int(_)))
}

/// The value must be a float.
pub fn is_float() -> RuleRef {
    shape("is_float", "a float", |v| matches!(v, Value::Float(_)))
}

/// The value must be a boolean.
pub fn is_bool() -> RuleRef {
    shape("is_bool", "a boolean", |v| matches!(v, Value::Bool(_)))
}

/// The value must be a list.
pub fn is_list() -> RuleRef {
    shape("is_list", "a list", |v| matches!(v, Value::List(_)))
}

/// The value must be a map.
pub fn is_map() -> RuleRef {
    shape("is_map", "a map", |v| matches!(v, Value::Map(_)))
}
