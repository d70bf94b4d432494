//! Normalizing filters.
//!
//! These rules rewrite the threaded value; whatever they return becomes the
//! input to the next rule in the chain (and, on full success, the value the
//! data collector or typed export receives). Non-string inputs pass through
//! the string filters unchanged.

use crate::error::ValidationError;
use crate::rule::{rule_fn, Outcome, RuleRef};
use crate::value::Value;

/// Trims leading and trailing whitespace from strings.
pub fn trim() -> RuleRef {
    rule_fn(|_ctx, value, _root| match value {
        Value::Str(s) => Outcome::pass(Value::Str(s.trim().to_string())),
        other => Outcome::pass(other),
    })
}

/// Lowercases strings.
pub fn lowercase() -> RuleRef {
    rule_fn(|_ctx, value, _root| match value {
        Value::Str(s) => Outcome::pass(Value::Str(s.to_lowercase())),
        other => Outcome::pass(other),
    })
}

/// Uppercases strings.
pub fn uppercase() -> RuleRef {
    rule_fn(|_ctx, value, _root| match value {
        Value::Str(s) => Outcome::pass(Value::Str(s.to_uppercase())),
        other => Outcome::pass(other),
    })
}

/// Coerces strings to integers; integers pass through.
///
/// An unparseable value rejects with kind `to_int` and threads unchanged,
/// so later rules still see the original.
pub fn to_int() -> RuleRef {
    rule_fn(|_ctx, value, _root| match value {
        Value::Int(n) => Outcome::pass(Value::Int(n)),
        Value::Str(s) => match s.trim().parse::<i64>() {
            Ok(n) => Outcome::pass(Value::Int(n)),
            Err(_) => Outcome::fail(
                Value::Str(s),
                ValidationError::new("to_int", "cannot coerce value to an integer"),
            ),
        },
        other => {
            let message = format!("cannot coerce {} to an integer", other.type_name());
            Outcome::fail(other, ValidationError::new("to_int", message))
        }
    })
}
