//! Regex-backed string format checks.
//!
//! The fixed formats compile their patterns once into cached statics; the
//! configurable [`pattern`] rule compiles at construction time and reports
//! a bad expression as a hard setup error, before any validation runs.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, ValidationError};
use crate::rule::{rule_fn, Outcome, RuleRef};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap());
static ALPHA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());
static ALPHA_NUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

fn format_rule(kind: &'static str, message: &'static str, re: &'static Lazy<Regex>) -> RuleRef {
    rule_fn(move |_ctx, value, _root| match value.as_str() {
        Some(s) if re.is_match(s) => Outcome::pass(value),
        Some(_) => Outcome::fail(value, ValidationError::new(kind, message)),
        None => Outcome::fail(value, ValidationError::new(kind, "must be a string")),
    })
}

/// The string must look like an email address.
pub fn email() -> RuleRef {
    format_rule("email", "must be a valid email address", &EMAIL_RE)
}

/// The string must be an http(s) URL.
pub fn url() -> RuleRef {
    format_rule("url", "must be a valid URL", &URL_RE)
}

/// The string must contain only ASCII letters.
pub fn alpha() -> RuleRef {
    format_rule("alpha", "must contain only letters", &ALPHA_RE)
}

/// The string must contain only ASCII letters and digits.
pub fn alpha_num() -> RuleRef {
    format_rule("alpha_num", "must contain only letters and digits", &ALPHA_NUM_RE)
}

/// The string must be pure ASCII.
pub fn ascii() -> RuleRef {
    rule_fn(|_ctx, value, _root| match value.as_str() {
        Some(s) if s.is_ascii() => Outcome::pass(value),
        Some(_) => Outcome::fail(
            value,
            ValidationError::new("ascii", "must contain only ASCII characters"),
        ),
        None => Outcome::fail(value, ValidationError::new("ascii", "must be a string")),
    })
}

/// The string must match the given regular expression.
///
/// An invalid expression is a hard [`Error::Pattern`], reported here rather
/// than at validation time.
///
/// # Example
///
/// ```rust
/// use gauntlet::{check_value, rules};
///
/// let hex = rules::pattern(r"^[0-9a-f]+$").unwrap();
/// let bag = check_value("c0ffee", &[hex]).unwrap();
/// assert!(bag.is_empty());
///
/// assert!(rules::pattern(r"[unclosed").is_err());
/// ```
pub fn pattern(pattern: &str) -> Result<RuleRef, Error> {
    let re = Regex::new(pattern)?;
    let message = format!("must match pattern '{pattern}'");
    Ok(rule_fn(move |_ctx, value, _root| match value.as_str() {
        Some(s) if re.is_match(s) => Outcome::pass(value),
        Some(_) => Outcome::fail(value, ValidationError::new("pattern", message.clone())),
        None => Outcome::fail(value, ValidationError::new("pattern", "must be a string")),
    }))
}
