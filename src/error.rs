//! Error types: per-field validation errors, composite rejections, the
//! ordered [`ErrorsBag`] aggregator, and hard call-aborting errors.
//!
//! Two tiers are kept strictly apart. A rule rejecting a value is a
//! per-field event, recorded in the [`ErrorsBag`] while the call continues.
//! A structural problem (wrong top-level shape, a failed typed export, a
//! bad rule setup) is a hard [`Error`]: the call aborts and no bag is
//! returned.

use std::fmt::{self, Display};

use indexmap::IndexMap;

/// A single per-field validation error.
///
/// `kind` is a machine-readable code (e.g. `min_len`), `message` the
/// human-readable description that appears in the bag's rendering.
///
/// # Example
///
/// ```rust
/// use gauntlet::ValidationError;
///
/// let error = ValidationError::new("required", "field is required");
/// assert_eq!(error.kind, "required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Machine-readable error code.
    pub kind: String,
    /// Human-readable error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// The error half of a rule outcome: a single error, or a composite
/// bundling several.
///
/// Composites exist only in transit. They are always flattened to their
/// leaf [`ValidationError`]s before being recorded, so an [`ErrorsBag`]
/// entry is always a flat list.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// A single leaf error.
    One(ValidationError),
    /// A bundle of rejections, possibly nested.
    Group(Vec<Rejection>),
}

impl Rejection {
    /// Flattens this rejection into leaf errors, preserving order.
    pub fn flatten(self) -> Vec<ValidationError> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<ValidationError>) {
        match self {
            Rejection::One(error) => out.push(error),
            Rejection::Group(children) => {
                for child in children {
                    child.flatten_into(out);
                }
            }
        }
    }
}

impl From<ValidationError> for Rejection {
    fn from(error: ValidationError) -> Self {
        Rejection::One(error)
    }
}

/// Ordered-per-key aggregator of validation errors.
///
/// Fields appear in first-insertion order; each field's errors keep call
/// order across repeated [`add`](ErrorsBag::add) calls. Created once per
/// top-level validation call and owned by the caller after return.
///
/// # Example
///
/// ```rust
/// use gauntlet::{ErrorsBag, ValidationError};
///
/// let mut bag = ErrorsBag::new();
/// bag.add("name", [ValidationError::new("required", "field is required")]);
///
/// assert!(bag.any());
/// assert!(bag.has("name"));
/// assert_eq!(bag.get("name").unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorsBag {
    entries: IndexMap<String, Vec<ValidationError>>,
}

impl ErrorsBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends errors to a field's list, creating the list on first use.
    pub fn add(
        &mut self,
        field: impl Into<String>,
        errors: impl IntoIterator<Item = ValidationError>,
    ) {
        self.entries
            .entry(field.into())
            .or_default()
            .extend(errors);
    }

    /// Returns true if the field has any recorded errors.
    pub fn has(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// Returns the field's errors in record order.
    pub fn get(&self, field: &str) -> Option<&[ValidationError]> {
        self.entries.get(field).map(Vec::as_slice)
    }

    /// Returns every entry, fields in first-insertion order.
    pub fn all(&self) -> &IndexMap<String, Vec<ValidationError>> {
        &self.entries
    }

    /// Returns true if any field has entries.
    pub fn any(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Returns true if no field has entries (total success).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of distinct fields with entries.
    pub fn field_count(&self) -> usize {
        self.entries.len()
    }
}

impl Display for ErrorsBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} field(s) failed:", self.field_count())?;
        for (field, errors) in &self.entries {
            let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
            writeln!(f, "{}: [{}]{{{}}}", field, errors.len(), messages.join("; "))?;
        }
        Ok(())
    }
}

/// A hard, call-aborting error.
///
/// Hard errors are never recorded in an [`ErrorsBag`]; callers observe
/// exactly one of a hard error or a bag (which may be empty).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The top-level input does not fit the chosen validation mode.
    #[error("expected {expected} input for this mode, got {got}")]
    InvalidShape {
        /// The shape the chosen mode requires.
        expected: &'static str,
        /// The shape that was supplied.
        got: &'static str,
    },

    /// The final value of a successful chain could not be converted into
    /// the configured export type.
    #[error("cannot export `{field}` into the requested type: {source}")]
    Export {
        /// The concrete field whose value failed to convert.
        field: String,
        /// The underlying conversion error.
        #[source]
        source: serde_json::Error,
    },

    /// A rule was configured with an invalid regular expression.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(kind: &str, message: &str) -> ValidationError {
        ValidationError::new(kind, message)
    }

    #[test]
    fn test_add_accumulates_in_call_order() {
        let mut bag = ErrorsBag::new();
        bag.add("a", [err("one", "first")]);
        bag.add("a", [err("two", "second")]);

        let errors = bag.get("a").unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, "one");
        assert_eq!(errors[1].kind, "two");
    }

    #[test]
    fn test_fields_keep_insertion_order() {
        let mut bag = ErrorsBag::new();
        bag.add("z", [err("e", "z failed")]);
        bag.add("a", [err("e", "a failed")]);

        let fields: Vec<_> = bag.all().keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["z", "a"]);
    }

    #[test]
    fn test_empty_bag_means_success() {
        let bag = ErrorsBag::new();
        assert!(!bag.any());
        assert!(bag.is_empty());
        assert!(!bag.has("missing"));
        assert!(bag.get("missing").is_none());
    }

    #[test]
    fn test_display_format() {
        let mut bag = ErrorsBag::new();
        bag.add("name", [err("required", "is required")]);
        bag.add("age", [err("min", "too small"), err("is_int", "not an int")]);

        let rendered = bag.to_string();
        assert!(rendered.starts_with("2 field(s) failed:\n"));
        assert!(rendered.contains("name: [1]{is required}\n"));
        assert!(rendered.contains("age: [2]{too small; not an int}\n"));
    }

    #[test]
    fn test_rejection_flatten_preserves_order() {
        let rejection = Rejection::Group(vec![
            Rejection::One(err("a", "1")),
            Rejection::Group(vec![
                Rejection::One(err("b", "2")),
                Rejection::Group(vec![]),
                Rejection::One(err("c", "3")),
            ]),
            Rejection::One(err("d", "4")),
        ]);

        let kinds: Vec<_> = rejection.flatten().into_iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_rejection_from_single_error() {
        let rejection = Rejection::from(err("k", "m"));
        assert_eq!(rejection.flatten().len(), 1);
    }
}
