//! Numeric and size comparisons.
//!
//! Comparison rules applied to values whose shape they cannot judge (e.g.
//! [`min`] on a string) reject per-field with a `not_comparable` or
//! `not_sized` kind; they never abort the call.

use crate::error::ValidationError;
use crate::rule::{rule_fn, Outcome, RuleRef};
use crate::value::Value;

fn numeric(kind: &'static str, message: String, pred: impl Fn(f64) -> bool + Send + Sync + 'static) -> RuleRef {
    rule_fn(move |_ctx, value, _root| match value.as_float() {
        Some(x) if pred(x) => Outcome::pass(value),
        Some(_) => Outcome::fail(value, ValidationError::new(kind, message.clone())),
        None => {
            let message = format!("cannot compare {} value", value.type_name());
            Outcome::fail(value, ValidationError::new("not_comparable", message))
        }
    })
}

/// The numeric value must be at least `limit`.
pub fn min(limit: i64) -> RuleRef {
    numeric("min", format!("must be at least {limit}"), move |x| {
        x >= limit as f64
    })
}

/// The numeric value must be at most `limit`.
pub fn max(limit: i64) -> RuleRef {
    numeric("max", format!("must be at most {limit}"), move |x| {
        x <= limit as f64
    })
}

/// The numeric value must lie in `lo..=hi`.
pub fn between(lo: i64, hi: i64) -> RuleRef {
    numeric(
        "between",
        format!("must be between {lo} and {hi}"),
        move |x| x >= lo as f64 && x <= hi as f64,
    )
}

fn sized(kind: &'static str, message: String, pred: impl Fn(usize) -> bool + Send + Sync + 'static) -> RuleRef {
    rule_fn(move |_ctx, value, _root| match value.size() {
        Some(n) if pred(n) => Outcome::pass(value),
        Some(_) => Outcome::fail(value, ValidationError::new(kind, message.clone())),
        None => {
            let message = format!("{} value has no length", value.type_name());
            Outcome::fail(value, ValidationError::new("not_sized", message))
        }
    })
}

/// Strings must have at least `limit` characters; lists, maps, and records
/// at least `limit` entries.
pub fn min_len(limit: usize) -> RuleRef {
    sized(
        "min_len",
        format!("length must be at least {limit}"),
        move |n| n >= limit,
    )
}

/// Strings must have at most `limit` characters; lists, maps, and records
/// at most `limit` entries.
pub fn max_len(limit: usize) -> RuleRef {
    sized(
        "max_len",
        format!("length must be at most {limit}"),
        move |n| n <= limit,
    )
}

/// The length must be exactly `expected`.
pub fn len(expected: usize) -> RuleRef {
    sized(
        "len",
        format!("length must be exactly {expected}"),
        move |n| n == expected,
    )
}

/// The value must equal `expected`.
pub fn eq(expected: impl Into<Value>) -> RuleRef {
    let expected = expected.into();
    rule_fn(move |_ctx, value, _root| {
        if value == expected {
            Outcome::pass(value)
        } else {
            let message = format!("must equal {expected}");
            Outcome::fail(value, ValidationError::new("eq", message))
        }
    })
}

/// The value must be one of `allowed`.
pub fn one_of<I, T>(allowed: I) -> RuleRef
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    let allowed: Vec<Value> = allowed.into_iter().map(Into::into).collect();
    rule_fn(move |_ctx, value, _root| {
        if allowed.contains(&value) {
            Outcome::pass(value)
        } else {
            Outcome::fail(
                value,
                ValidationError::new("one_of", "must be one of the allowed values"),
            )
        }
    })
}

/// The value must not be any of `denied`.
pub fn not_in<I, T>(denied: I) -> RuleRef
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    let denied: Vec<Value> = denied.into_iter().map(Into::into).collect();
    rule_fn(move |_ctx, value, _root| {
        if denied.contains(&value) {
            Outcome::fail(
                value,
                ValidationError::new("not_in", "must not be one of the denied values"),
            )
        } else {
            Outcome::pass(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::check_value;

    fn kinds(value: impl Into<Value>, rules: &[RuleRef]) -> Vec<String> {
        let bag = check_value(value, rules).unwrap();
        bag.get("value")
            .map(|errors| errors.iter().map(|e| e.kind.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_min_max_between() {
        assert!(kinds(5i64, &[min(5)]).is_empty());
        assert_eq!(kinds(4i64, &[min(5)]), vec!["min"]);
        assert!(kinds(5i64, &[max(5)]).is_empty());
        assert_eq!(kinds(6i64, &[max(5)]), vec!["max"]);
        assert!(kinds(5i64, &[between(1, 10)]).is_empty());
        assert_eq!(kinds(11i64, &[between(1, 10)]), vec!["between"]);
    }

    #[test]
    fn test_floats_compare_too() {
        assert!(kinds(2.5, &[min(2)]).is_empty());
        assert_eq!(kinds(1.5, &[min(2)]), vec!["min"]);
    }

    #[test]
    fn test_non_numeric_is_not_comparable() {
        assert_eq!(kinds("five", &[min(5)]), vec!["not_comparable"]);
        assert_eq!(kinds(Value::Null, &[max(5)]), vec!["not_comparable"]);
    }

    #[test]
    fn test_length_rules_count_chars_and_entries() {
        assert!(kinds("héllo", &[min_len(5)]).is_empty());
        assert_eq!(kinds("hi", &[min_len(5)]), vec!["min_len"]);
        assert_eq!(kinds("toolong", &[max_len(3)]), vec!["max_len"]);
        assert!(kinds(vec![1i64, 2], &[len(2)]).is_empty());
        assert_eq!(kinds(vec![1i64], &[len(2)]), vec!["len"]);
    }

    #[test]
    fn test_scalars_are_not_sized() {
        assert_eq!(kinds(5i64, &[min_len(1)]), vec!["not_sized"]);
    }

    #[test]
    fn test_eq() {
        assert!(kinds("a", &[eq("a")]).is_empty());
        assert_eq!(kinds("b", &[eq("a")]), vec!["eq"]);
    }

    #[test]
    fn test_one_of_and_not_in() {
        assert!(kinds("red", &[one_of(["red", "blue"])]).is_empty());
        assert_eq!(kinds("green", &[one_of(["red", "blue"])]), vec!["one_of"]);
        assert!(kinds("green", &[not_in(["red", "blue"])]).is_empty());
        assert_eq!(kinds("red", &[not_in(["red", "blue"])]), vec!["not_in"]);
    }
}
