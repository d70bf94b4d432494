//! Composition over other rules.
//!
//! [`group`], [`optional`], and [`when`] are composite rules: instead of
//! being applied, they expand into a sub-rule list computed at traversal
//! time, against the value as it stands at their turn in the chain.
//! [`combine`] is a leaf that bundles several checks into one chain node,
//! reporting their failures together.

use std::sync::Arc;

use crate::context::Context;
use crate::error::Rejection;
use crate::rule::{Outcome, Rule, RuleRef};
use crate::value::Value;

struct Group(Vec<RuleRef>);

impl Rule for Group {
    // Composites are replaced by their expansion; apply is a no-op kept
    // for direct callers outside a walk.
    fn apply(&self, _ctx: &Context, value: Value, _root: &Value) -> Outcome {
        Outcome::pass(value)
    }

    fn expand(&self, _ctx: &Context, _value: &Value, _root: &Value) -> Option<Vec<RuleRef>> {
        Some(self.0.clone())
    }
}

/// Runs `rules` in place of this node, unconditionally.
pub fn group(rules: Vec<RuleRef>) -> RuleRef {
    Arc::new(Group(rules))
}

struct Optional(Vec<RuleRef>);

impl Rule for Optional {
    fn apply(&self, _ctx: &Context, value: Value, _root: &Value) -> Outcome {
        Outcome::pass(value)
    }

    fn expand(&self, _ctx: &Context, value: &Value, _root: &Value) -> Option<Vec<RuleRef>> {
        if value.is_empty() {
            Some(Vec::new())
        } else {
            Some(self.0.clone())
        }
    }
}

/// Runs `rules` only when the value is present and non-empty; absent
/// values skip the whole sub-chain instead of failing it.
///
/// # Example
///
/// ```rust
/// use gauntlet::{rules, Checker, Value};
/// use serde_json::json;
///
/// let checker = Checker::new().rule("nickname", [rules::optional(vec![rules::min_len(3)])]);
///
/// // absent: the sub-chain never runs
/// let bag = checker.check(&Value::from(json!({}))).unwrap();
/// assert!(bag.is_empty());
///
/// // present: it does
/// let bag = checker.check(&Value::from(json!({"nickname": "jo"}))).unwrap();
/// assert!(bag.has("nickname"));
/// ```
pub fn optional(rules: Vec<RuleRef>) -> RuleRef {
    Arc::new(Optional(rules))
}

type Predicate = dyn Fn(&Value, &Value) -> bool + Send + Sync;

struct When {
    predicate: Box<Predicate>,
    rules: Vec<RuleRef>,
}

impl Rule for When {
    fn apply(&self, _ctx: &Context, value: Value, _root: &Value) -> Outcome {
        Outcome::pass(value)
    }

    fn expand(&self, _ctx: &Context, value: &Value, root: &Value) -> Option<Vec<RuleRef>> {
        if (self.predicate)(value, root) {
            Some(self.rules.clone())
        } else {
            Some(Vec::new())
        }
    }
}

/// Runs `rules` only when `predicate` holds for (value, root) at this
/// node's turn. The predicate observes the value as already transformed by
/// earlier rules in the chain.
pub fn when<F>(predicate: F, rules: Vec<RuleRef>) -> RuleRef
where
    F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
{
    Arc::new(When {
        predicate: Box::new(predicate),
        rules,
    })
}

struct Combine(Vec<RuleRef>);

impl Rule for Combine {
    fn apply(&self, ctx: &Context, value: Value, root: &Value) -> Outcome {
        let mut value = value;
        let mut rejections = Vec::new();
        for rule in &self.0 {
            let outcome = rule.apply(ctx, value, root);
            value = outcome.value;
            if let Some(rejection) = outcome.error {
                rejections.push(rejection);
            }
        }
        if rejections.is_empty() {
            Outcome::pass(value)
        } else {
            Outcome::fail(value, Rejection::Group(rejections))
        }
    }
}

/// Applies every rule to the threaded value as a single chain node,
/// reporting all their failures at once as a composite rejection (always
/// flattened before it reaches the bag).
///
/// Unlike [`group`], a bail wrapped around `combine` covers the bundle as
/// a whole.
pub fn combine(rules: Vec<RuleRef>) -> RuleRef {
    Arc::new(Combine(rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::check_value;
    use crate::rule::bail;
    use crate::rules::{is_string, min, min_len, required};

    fn kinds(value: impl Into<Value>, rules: &[RuleRef]) -> Vec<String> {
        let bag = check_value(value, rules).unwrap();
        bag.get("value")
            .map(|errors| errors.iter().map(|e| e.kind.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_group_runs_in_place() {
        let chain = [group(vec![required(), is_string()])];
        assert_eq!(kinds(Value::Null, &chain), vec!["required", "is_string"]);
    }

    #[test]
    fn test_optional_skips_absent_values() {
        let chain = [optional(vec![min_len(3)])];
        assert!(kinds(Value::Null, &chain).is_empty());
        assert!(kinds("", &chain).is_empty());
        assert_eq!(kinds("jo", &chain), vec!["min_len"]);
        assert!(kinds("jon", &chain).is_empty());
    }

    #[test]
    fn test_when_consults_the_threaded_value() {
        let chain = [when(
            |value, _root| value.as_int().is_some(),
            vec![min(10)],
        )];
        assert_eq!(kinds(5i64, &chain), vec!["min"]);
        // predicate false: the branch never runs
        assert!(kinds("five", &chain).is_empty());
    }

    #[test]
    fn test_combine_reports_all_failures_flat() {
        let chain = [combine(vec![is_string(), min_len(3)])];
        let got = kinds(7i64, &chain);
        assert_eq!(got, vec!["is_string", "not_sized"]);
    }

    #[test]
    fn test_bailing_combine_stops_the_chain() {
        let chain = [bail(combine(vec![is_string()])), min_len(3)];
        assert_eq!(kinds(7i64, &chain), vec!["is_string"]);
    }
}
