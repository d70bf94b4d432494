//! Public validation entry points, dispatching by input shape.
//!
//! [`Checker`] validates mapping- or record-shaped roots against a table of
//! path-spec → rule-chain entries. The free functions cover single values
//! ([`check_value`], [`check_value_into`]) and the elements of a list
//! ([`check_each`]).
//!
//! Every entry point returns `Result<ErrorsBag, Error>`: callers observe
//! exactly one of a hard error (no bag) or a bag, which is empty on total
//! success.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::collect::DataCollector;
use crate::context::Context;
use crate::engine::{apply_chain, ChainRun, ExportSink};
use crate::error::{Error, ErrorsBag};
use crate::path::PathSpec;
use crate::resolve::{resolve, ResolvedField};
use crate::rule::RuleRef;
use crate::value::{Record, Value};

/// Validates mapping- or record-shaped data against per-path rule chains.
///
/// Paths are registered with [`rule`](Checker::rule) in the order they
/// should be checked; wildcard paths fan out over list elements, and every
/// concrete match runs the same chain.
///
/// # Example
///
/// ```rust
/// use gauntlet::{rules, Checker, Value};
/// use serde_json::json;
///
/// let checker = Checker::new()
///     .rule("name", [rules::required(), rules::min_len(2)])
///     .rule("tags.*", [rules::is_string()]);
///
/// let bag = checker
///     .check(&Value::from(json!({"name": "x", "tags": ["a", 3]})))
///     .unwrap();
///
/// assert!(bag.has("name"));
/// assert!(bag.has("tags.1"));
/// assert!(!bag.has("tags.0"));
/// ```
#[derive(Default)]
pub struct Checker {
    rules: IndexMap<String, Vec<RuleRef>>,
    ctx: Context,
    collector: Option<Arc<dyn DataCollector>>,
    fail_fast: bool,
}

impl Checker {
    /// Creates a checker with no rules registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule chain for a path specification and returns self for
    /// chaining. Registering the same path again extends its chain.
    pub fn rule(
        mut self,
        path: impl Into<String>,
        rules: impl IntoIterator<Item = RuleRef>,
    ) -> Self {
        self.rules.entry(path.into()).or_default().extend(rules);
        self
    }

    /// Uses `ctx` for every rule application instead of a fresh context.
    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    /// Injects a sink that receives each field's final value on full
    /// per-field success, keyed by concrete resolved path.
    pub fn collect_into(mut self, sink: Arc<dyn DataCollector>) -> Self {
        self.collector = Some(sink);
        self
    }

    /// When set, any failure stops that field's chain immediately, as if
    /// every rule declared the bail capability. Other fields are still
    /// checked.
    pub fn fail_fast(mut self, yes: bool) -> Self {
        self.fail_fast = yes;
        self
    }

    /// Validates a root of unknown shape. Mappings and records are
    /// accepted; anything else is a hard [`Error::InvalidShape`].
    pub fn check(&self, root: &Value) -> Result<ErrorsBag, Error> {
        match root {
            Value::Map(_) | Value::Record(_) => self.run(root),
            other => Err(Error::InvalidShape {
                expected: "map or record",
                got: other.type_name(),
            }),
        }
    }

    /// Validates a mapping-shaped root; hard-errors on any other shape.
    pub fn check_map(&self, root: &Value) -> Result<ErrorsBag, Error> {
        match root {
            Value::Map(_) => self.run(root),
            other => Err(Error::InvalidShape {
                expected: "map",
                got: other.type_name(),
            }),
        }
    }

    /// Validates a structured record.
    pub fn check_record(&self, record: &Record) -> Result<ErrorsBag, Error> {
        let root = Value::Record(record.clone());
        self.run(&root)
    }

    fn run(&self, root: &Value) -> Result<ErrorsBag, Error> {
        let mut bag = ErrorsBag::new();
        let run = ChainRun {
            ctx: &self.ctx,
            root,
            fail_fast: self.fail_fast,
            collector: self.collector.as_deref(),
        };

        for (path, rules) in &self.rules {
            let spec = PathSpec::parse(path);
            for field in resolve(&spec, root) {
                apply_chain(&run, rules, field, &mut bag, None)?;
            }
        }

        Ok(bag)
    }
}

/// Validates one bare value against a rule chain.
///
/// Errors are recorded under the synthetic field key `value`.
///
/// # Example
///
/// ```rust
/// use gauntlet::{check_value, rules};
///
/// let bag = check_value(17i64, &[rules::min(18)]).unwrap();
/// assert!(bag.has("value"));
/// ```
pub fn check_value(value: impl Into<Value>, rules: &[RuleRef]) -> Result<ErrorsBag, Error> {
    check_value_inner(value.into(), rules, None)
}

/// Validates one bare value and, on a fully successful chain, exports the
/// final threaded value into `T`.
///
/// The export conversion failing is a hard [`Error::Export`]; a chain with
/// rejections simply yields `None` alongside the bag.
///
/// # Example
///
/// ```rust
/// use gauntlet::{check_value_into, rules};
///
/// let (bag, n): (_, Option<i64>) =
///     check_value_into(" 42 ", &[rules::trim(), rules::to_int()]).unwrap();
/// assert!(bag.is_empty());
/// assert_eq!(n, Some(42));
/// ```
pub fn check_value_into<T: DeserializeOwned>(
    value: impl Into<Value>,
    rules: &[RuleRef],
) -> Result<(ErrorsBag, Option<T>), Error> {
    let mut exported = None;
    let mut sink = |final_value: Value| -> Result<(), serde_json::Error> {
        exported = Some(serde_json::from_value(final_value.into())?);
        Ok(())
    };
    let bag = check_value_inner(value.into(), rules, Some(&mut sink))?;
    Ok((bag, exported))
}

fn check_value_inner(
    value: Value,
    rules: &[RuleRef],
    export: Option<ExportSink<'_>>,
) -> Result<ErrorsBag, Error> {
    let mut bag = ErrorsBag::new();
    let root = value.clone();
    let ctx = Context::new();
    let run = ChainRun {
        ctx: &ctx,
        root: &root,
        fail_fast: false,
        collector: None,
    };
    let field = ResolvedField {
        field: "value".to_string(),
        is_nil: value.is_null(),
        value,
    };
    apply_chain(&run, rules, field, &mut bag, export)?;
    Ok(bag)
}

/// Validates every element of a list against the same rule chain, errors
/// keyed by element index. Hard-errors when the input is not a list.
///
/// # Example
///
/// ```rust
/// use gauntlet::{check_each, rules, Value};
/// use serde_json::json;
///
/// let bag = check_each(Value::from(json!([1, "two", 3])), &[rules::is_int()]).unwrap();
/// assert!(bag.has("1"));
/// assert!(!bag.has("0"));
/// ```
pub fn check_each(values: impl Into<Value>, rules: &[RuleRef]) -> Result<ErrorsBag, Error> {
    let root = values.into();
    let items = match &root {
        Value::List(items) => items,
        other => {
            return Err(Error::InvalidShape {
                expected: "list",
                got: other.type_name(),
            })
        }
    };

    let mut bag = ErrorsBag::new();
    let ctx = Context::new();
    let run = ChainRun {
        ctx: &ctx,
        root: &root,
        fail_fast: false,
        collector: None,
    };
    for (index, element) in items.iter().enumerate() {
        let field = ResolvedField {
            field: index.to_string(),
            value: element.clone(),
            is_nil: element.is_null(),
        };
        apply_chain(&run, rules, field, &mut bag, None)?;
    }
    Ok(bag)
}
