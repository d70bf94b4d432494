//! Data collection for fields that fully passed validation.
//!
//! A [`DataCollector`] is an injected sink the engine writes to after a
//! field's whole chain succeeds, keyed by the concrete resolved path. It is
//! the way callers harvest normalized values (post `trim`, `to_int`, …)
//! without re-walking the input.

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::value::Value;

/// A sink recording values of fields that fully passed validation.
///
/// Written only on full per-field success; a field with any recorded error
/// never reaches the collector. Must not be shared across concurrently
/// overlapping validation calls.
pub trait DataCollector: Send + Sync {
    /// Records `value` under `key`, replacing any previous entry.
    fn set(&self, key: &str, value: Value);

    /// Returns the recorded value for `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;

    /// Returns true if `key` has a recorded value.
    fn has(&self, key: &str) -> bool;
}

/// The default in-memory collector: an insertion-ordered map behind a lock.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use gauntlet::{rules, Checker, MapCollector, Value};
/// use serde_json::json;
///
/// let sink = Arc::new(MapCollector::new());
/// let checker = Checker::new()
///     .rule("name", [rules::trim(), rules::required()])
///     .collect_into(sink.clone());
///
/// let bag = checker.check(&Value::from(json!({"name": "  ada  "}))).unwrap();
/// assert!(bag.is_empty());
/// assert_eq!(sink.get("name"), Some(Value::from("ada")));
/// ```
#[derive(Debug, Default)]
pub struct MapCollector {
    entries: RwLock<IndexMap<String, Value>>,
}

impl MapCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything collected so far, in insertion order.
    pub fn snapshot(&self) -> IndexMap<String, Value> {
        self.entries.read().clone()
    }

    /// Consumes the collector, returning the collected entries.
    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.entries.into_inner()
    }
}

impl DataCollector for MapCollector {
    fn set(&self, key: &str, value: Value) {
        self.entries.write().insert(key.to_string(), value);
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    fn has(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }
}
