//! The rule execution engine.
//!
//! [`apply_chain`] threads one resolved field's value through its rule
//! chain (via [`RuleWalk`]), records rejections in the caller's
//! [`ErrorsBag`], honors bail semantics, and on full success performs the
//! configured side effects: a data-collector write and, for single-value
//! validation, a typed export.
//!
//! Per-field rejections never abort the call; the only hard error this
//! module produces is a failed export conversion.

use crate::chain::RuleWalk;
use crate::collect::DataCollector;
use crate::context::Context;
use crate::error::{Error, ErrorsBag};
use crate::resolve::ResolvedField;
use crate::rule::RuleRef;
use crate::value::Value;

/// Sink for the final value of a fully successful chain. The engine maps a
/// conversion failure to [`Error::Export`] with the field's concrete path.
pub(crate) type ExportSink<'a> = &'a mut dyn FnMut(Value) -> Result<(), serde_json::Error>;

/// Per-call state shared by every chain of one top-level validation.
pub(crate) struct ChainRun<'a> {
    pub ctx: &'a Context,
    pub root: &'a Value,
    /// When set, any failure stops the field's chain, as if every rule
    /// bailed.
    pub fail_fast: bool,
    pub collector: Option<&'a dyn DataCollector>,
}

/// Runs one resolved field through its rule chain.
///
/// The threaded value is updated from every rule's outcome, rejection or
/// not, so a rejecting rule's normalization still reaches the next rule.
/// Once a failure has occurred, the first bail-capable rule whose turn it
/// is ends the chain; no further rule (nor any undescended sub-rule list)
/// is applied for this field.
pub(crate) fn apply_chain(
    run: &ChainRun<'_>,
    rules: &[RuleRef],
    field: ResolvedField,
    bag: &mut ErrorsBag,
    export: Option<ExportSink<'_>>,
) -> Result<(), Error> {
    let ResolvedField {
        field, mut value, ..
    } = field;
    let mut failed = false;

    let mut walk = RuleWalk::new(run.ctx, rules.to_vec(), &value, run.root);
    while let Some(rule) = walk.current().cloned() {
        let outcome = rule.apply(run.ctx, value, run.root);
        value = outcome.value;
        if let Some(rejection) = outcome.error {
            bag.add(field.as_str(), rejection.flatten());
            failed = true;
        }
        if failed && (run.fail_fast || rule.bails()) {
            break;
        }
        walk.advance(run.ctx, &value, run.root);
    }

    if !failed {
        if let Some(collector) = run.collector {
            collector.set(&field, value.clone());
        }
        if let Some(sink) = export {
            sink(value).map_err(|source| Error::Export { field, source })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::MapCollector;
    use crate::error::ValidationError;
    use crate::rule::{bail, rule_fn, Outcome};

    fn resolved(field: &str, value: Value) -> ResolvedField {
        ResolvedField {
            field: field.to_string(),
            is_nil: value.is_null(),
            value,
        }
    }

    fn run_chain(
        rules: &[RuleRef],
        field: ResolvedField,
        fail_fast: bool,
    ) -> (ErrorsBag, Result<(), Error>) {
        let ctx = Context::new();
        let root = Value::Null;
        let run = ChainRun {
            ctx: &ctx,
            root: &root,
            fail_fast,
            collector: None,
        };
        let mut bag = ErrorsBag::new();
        let result = apply_chain(&run, rules, field, &mut bag, None);
        (bag, result)
    }

    fn fails_with(kind: &str) -> RuleRef {
        let kind = kind.to_string();
        rule_fn(move |_ctx, value, _root| {
            Outcome::fail(value, ValidationError::new(kind.clone(), kind.clone()))
        })
    }

    fn passes() -> RuleRef {
        rule_fn(|_ctx, value, _root| Outcome::pass(value))
    }

    #[test]
    fn test_failed_value_still_threads_to_next_rule() {
        // Rejects but returns a doubled value; the next rule must see it.
        let double_and_fail = rule_fn(|_ctx, value, _root| {
            let doubled = value.as_int().map(|n| n * 2).unwrap_or_default();
            Outcome::fail(Value::Int(doubled), ValidationError::new("nope", "nope"))
        });
        let expect_six = rule_fn(|_ctx, value, _root| {
            if value.as_int() == Some(6) {
                Outcome::pass(value)
            } else {
                Outcome::fail(value, ValidationError::new("wrong", "wrong input"))
            }
        });

        let (bag, result) = run_chain(
            &[double_and_fail, expect_six],
            resolved("n", Value::Int(3)),
            false,
        );
        result.unwrap();
        let kinds: Vec<_> = bag.get("n").unwrap().iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["nope"]);
    }

    #[test]
    fn test_bail_stops_the_chain() {
        let (bag, result) = run_chain(
            &[passes(), bail(fails_with("second")), fails_with("third")],
            resolved("f", Value::Int(1)),
            false,
        );
        result.unwrap();
        let kinds: Vec<_> = bag.get("f").unwrap().iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["second"]);
    }

    #[test]
    fn test_earlier_failure_trips_a_later_bail_rule() {
        // The bail rule itself passes, but an earlier failure has occurred
        // by its turn, so the chain stops after it.
        let (bag, result) = run_chain(
            &[fails_with("first"), bail(passes()), fails_with("third")],
            resolved("f", Value::Int(1)),
            false,
        );
        result.unwrap();
        let kinds: Vec<_> = bag.get("f").unwrap().iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["first"]);
    }

    #[test]
    fn test_non_bailing_chain_accumulates_everything() {
        let (bag, result) = run_chain(
            &[fails_with("a"), fails_with("b"), fails_with("c")],
            resolved("f", Value::Int(1)),
            false,
        );
        result.unwrap();
        assert_eq!(bag.get("f").unwrap().len(), 3);
    }

    #[test]
    fn test_fail_fast_stops_on_first_failure() {
        let (bag, result) = run_chain(
            &[fails_with("a"), fails_with("b")],
            resolved("f", Value::Int(1)),
            true,
        );
        result.unwrap();
        let kinds: Vec<_> = bag.get("f").unwrap().iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["a"]);
    }

    #[test]
    fn test_collector_written_only_on_success() {
        let ctx = Context::new();
        let root = Value::Null;
        let collector = MapCollector::new();
        let run = ChainRun {
            ctx: &ctx,
            root: &root,
            fail_fast: false,
            collector: Some(&collector),
        };

        let mut bag = ErrorsBag::new();
        apply_chain(&run, &[passes()], resolved("ok", Value::Int(1)), &mut bag, None).unwrap();
        apply_chain(
            &run,
            &[fails_with("e")],
            resolved("bad", Value::Int(2)),
            &mut bag,
            None,
        )
        .unwrap();

        assert!(collector.has("ok"));
        assert!(!collector.has("bad"));
    }

    #[test]
    fn test_collector_receives_the_final_threaded_value() {
        let ctx = Context::new();
        let root = Value::Null;
        let collector = MapCollector::new();
        let run = ChainRun {
            ctx: &ctx,
            root: &root,
            fail_fast: false,
            collector: Some(&collector),
        };

        let increment = rule_fn(|_ctx, value, _root| {
            Outcome::pass(Value::Int(value.as_int().unwrap_or_default() + 1))
        });
        let mut bag = ErrorsBag::new();
        apply_chain(
            &run,
            &[increment.clone(), increment],
            resolved("n", Value::Int(0)),
            &mut bag,
            None,
        )
        .unwrap();

        assert_eq!(collector.get("n"), Some(Value::Int(2)));
    }

    #[test]
    fn test_export_conversion_failure_is_a_hard_error() {
        let ctx = Context::new();
        let root = Value::Null;
        let run = ChainRun {
            ctx: &ctx,
            root: &root,
            fail_fast: false,
            collector: None,
        };

        let mut bag = ErrorsBag::new();
        let mut sink = |value: Value| -> Result<(), serde_json::Error> {
            serde_json::from_value::<i64>(value.into()).map(|_| ())
        };
        let result = apply_chain(
            &run,
            &[passes()],
            resolved("f", Value::from("not a number")),
            &mut bag,
            Some(&mut sink),
        );

        assert!(matches!(result, Err(Error::Export { field, .. }) if field == "f"));
    }

    #[test]
    fn test_export_skipped_when_the_field_failed() {
        let ctx = Context::new();
        let root = Value::Null;
        let run = ChainRun {
            ctx: &ctx,
            root: &root,
            fail_fast: false,
            collector: None,
        };

        let mut bag = ErrorsBag::new();
        let mut called = false;
        let mut sink = |_value: Value| -> Result<(), serde_json::Error> {
            called = true;
            Ok(())
        };
        apply_chain(
            &run,
            &[fails_with("e")],
            resolved("f", Value::Int(1)),
            &mut bag,
            Some(&mut sink),
        )
        .unwrap();

        assert!(!called);
        assert!(bag.has("f"));
    }
}
