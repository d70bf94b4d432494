//! # Gauntlet
//!
//! Rule-chain validation for loosely-typed, arbitrarily nested data:
//! a value runs the gauntlet of its rules, and every failure is collected
//! into a per-field error report.
//!
//! ## Overview
//!
//! Call sites hand over request-shaped data whose structure the validation
//! logic does not know statically. A dotted, wildcard-capable path
//! specification (`users.*.email`) selects fields out of that data; each
//! concrete match is threaded through an ordered chain of rules. Rules may
//! transform the value as it flows, may declare bail semantics (stop the
//! chain after a failure), and may be composite: expanded at traversal time
//! into a dynamically computed sub-chain, so conditional branches are
//! discovered lazily instead of being built up front.
//!
//! ## Core Types
//!
//! - [`Value`]: loosely-typed input data (maps, records, lists, scalars)
//! - [`PathSpec`] / [`resolve`]: wildcard field paths and their resolution
//! - [`Rule`] / [`RuleRef`]: the rule contract with optional bail/expand
//!   capabilities
//! - [`Checker`]: validates map- and record-shaped roots against a
//!   path → chain table
//! - [`ErrorsBag`]: ordered per-field aggregation of [`ValidationError`]s
//!
//! ## Example
//!
//! ```rust
//! use gauntlet::{rules, Checker, Value};
//! use serde_json::json;
//!
//! let checker = Checker::new()
//!     .rule("user.name", [rules::required(), rules::min_len(2)])
//!     .rule("user.emails.*", [rules::email()]);
//!
//! let data = Value::from(json!({
//!     "user": {"name": "A", "emails": ["ok@example.com", "nope"]}
//! }));
//!
//! let bag = checker.check(&data).unwrap();
//! assert!(bag.has("user.name"));
//! assert!(bag.has("user.emails.1"));
//! assert!(!bag.has("user.emails.0"));
//! ```
//!
//! Validation failures are always per-field and never abort the call;
//! hard [`Error`]s are reserved for structural problems (wrong top-level
//! shape, a failed typed export, a bad rule setup).

pub mod chain;
pub mod check;
pub mod collect;
pub mod context;
mod engine;
pub mod error;
pub mod path;
pub mod resolve;
pub mod rule;
pub mod rules;
pub mod value;

pub use chain::RuleWalk;
pub use check::{check_each, check_value, check_value_into, Checker};
pub use collect::{DataCollector, MapCollector};
pub use context::Context;
pub use error::{Error, ErrorsBag, Rejection, ValidationError};
pub use path::{PathSpec, Segment};
pub use resolve::{resolve, ResolvedField};
pub use rule::{bail, rule_fn, Outcome, Rule, RuleRef};
pub use value::{Record, RecordField, Value};
