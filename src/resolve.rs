//! Path resolution: matching a [`PathSpec`] against actual data.
//!
//! Resolution walks one path component per level against a current value,
//! fanning out on wildcards over lists and yielding one [`ResolvedField`]
//! per concrete match. Output order is deterministic: pre-order,
//! left-to-right, ascending index for every wildcard fan-out.
//!
//! A nil value encountered at any depth collapses the entire remaining
//! pattern into a single terminal entry whose path carries the unconsumed
//! suffix verbatim (wildcards included). `a.*.b` resolved where `a` is nil
//! therefore yields one entry for `a.*.b`, not an expansion.

use crate::path::{PathSpec, Segment};
use crate::value::Value;

/// One concrete match of a path specification against actual data.
///
/// Transient: created per match and consumed immediately by the execution
/// engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    /// The concrete path, with wildcards replaced by literal indices (or
    /// left verbatim on nil-collapsed branches).
    pub field: String,
    /// The resolved value; `Value::Null` for absent data.
    pub value: Value,
    /// True when the resolved value is nil.
    pub is_nil: bool,
}

/// Resolves a path specification against a root value.
///
/// Returns every concrete match in deterministic order. A spec without
/// wildcards always yields exactly one entry whose `field` equals the spec
/// verbatim; a wildcard spec yields zero or more, except that a nil
/// antecedent collapses to exactly one terminal entry.
///
/// # Example
///
/// ```rust
/// use gauntlet::{resolve, PathSpec, Value};
/// use serde_json::json;
///
/// let root = Value::from(json!({"items": [{"sku": "a"}, {"sku": "b"}]}));
/// let fields = resolve(&PathSpec::parse("items.*.sku"), &root);
///
/// let paths: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
/// assert_eq!(paths, vec!["items.0.sku", "items.1.sku"]);
/// ```
pub fn resolve(spec: &PathSpec, root: &Value) -> Vec<ResolvedField> {
    let mut out = Vec::new();
    let mut trail = Vec::new();
    walk(spec, 0, &mut trail, root, &mut out);
    out
}

fn walk(
    spec: &PathSpec,
    pos: usize,
    trail: &mut Vec<String>,
    current: &Value,
    out: &mut Vec<ResolvedField>,
) {
    let segments = spec.segments();

    if pos == segments.len() {
        out.push(ResolvedField {
            field: join(trail, std::iter::empty()),
            value: current.clone(),
            is_nil: current.is_null(),
        });
        return;
    }

    // A nil antecedent terminates resolution for the whole remaining
    // pattern, wildcards left verbatim.
    if current.is_null() {
        out.push(ResolvedField {
            field: join(trail, spec.suffix(pos)),
            value: Value::Null,
            is_nil: true,
        });
        return;
    }

    match &segments[pos] {
        Segment::Literal(token) => {
            let next = lookup(current, token);
            trail.push(token.clone());
            walk(spec, pos + 1, trail, next.unwrap_or(&Value::Null), out);
            trail.pop();
        }
        Segment::Wildcard => match current {
            Value::List(items) => {
                for (index, element) in items.iter().enumerate() {
                    trail.push(index.to_string());
                    walk(spec, pos + 1, trail, element, out);
                    trail.pop();
                }
            }
            // Wildcard over anything that is not a list collapses like nil.
            _ => {
                out.push(ResolvedField {
                    field: join(trail, spec.suffix(pos)),
                    value: Value::Null,
                    is_nil: true,
                });
            }
        },
    }
}

/// Resolves one literal token against the current value. Absent keys,
/// unparseable or out-of-bounds indices, and descent into scalars all
/// produce `None` (treated as nil by the caller).
fn lookup<'a>(current: &'a Value, token: &str) -> Option<&'a Value> {
    match current {
        Value::Map(entries) => entries.get(token),
        Value::List(items) => token.parse::<usize>().ok().and_then(|i| items.get(i)),
        Value::Record(record) => record.lookup(token),
        _ => None,
    }
}

fn join<'a>(trail: &[String], suffix: impl Iterator<Item = &'a str>) -> String {
    let mut parts: Vec<&str> = trail.iter().map(String::as_str).collect();
    parts.extend(suffix);
    parts.join(".")
}
