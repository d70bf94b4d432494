//! Field-path specifications for locating values in nested structures.
//!
//! This module provides [`PathSpec`] and [`Segment`] for parsing and
//! representing dotted field paths like `users.*.email`, where each
//! component is either a literal key/index token or the wildcard `*`.

use std::fmt::{self, Display};

/// One component of a [`PathSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A literal key or index token (e.g. `user`, `0`).
    Literal(String),
    /// The wildcard token `*`, fanning out over list elements.
    Wildcard,
}

impl Segment {
    /// Renders the segment back to its path-spec token.
    pub fn token(&self) -> &str {
        match self {
            Segment::Literal(tok) => tok,
            Segment::Wildcard => "*",
        }
    }
}

/// A parsed field-path specification.
///
/// Components are separated by `.`; the token `*` is a wildcard, everything
/// else is a literal. Parsing is infallible: any string is a valid spec.
///
/// # Example
///
/// ```rust
/// use gauntlet::{PathSpec, Segment};
///
/// let spec = PathSpec::parse("users.*.email");
/// assert_eq!(spec.segments().len(), 3);
/// assert_eq!(spec.segments()[1], Segment::Wildcard);
/// assert_eq!(spec.to_string(), "users.*.email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSpec {
    segments: Vec<Segment>,
}

impl PathSpec {
    /// Parses a dot-separated specification.
    pub fn parse(spec: &str) -> Self {
        let segments = spec
            .split('.')
            .map(|tok| {
                if tok == "*" {
                    Segment::Wildcard
                } else {
                    Segment::Literal(tok.to_string())
                }
            })
            .collect();
        Self { segments }
    }

    /// Returns the parsed components in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true if any component is a wildcard.
    pub fn has_wildcard(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Wildcard))
    }

    /// Renders the unconsumed suffix starting at `pos` verbatim, wildcards
    /// included. Used for the terminal entry of a nil-collapsed branch.
    pub(crate) fn suffix(&self, pos: usize) -> impl Iterator<Item = &str> {
        self.segments[pos..].iter().map(Segment::token)
    }
}

impl From<&str> for PathSpec {
    fn from(spec: &str) -> Self {
        Self::parse(spec)
    }
}

impl Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment.token())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literals() {
        let spec = PathSpec::parse("user.email");
        assert_eq!(
            spec.segments(),
            &[
                Segment::Literal("user".to_string()),
                Segment::Literal("email".to_string()),
            ]
        );
        assert!(!spec.has_wildcard());
    }

    #[test]
    fn test_parse_wildcard() {
        let spec = PathSpec::parse("items.*.sku");
        assert_eq!(spec.segments()[1], Segment::Wildcard);
        assert!(spec.has_wildcard());
    }

    #[test]
    fn test_numeric_tokens_stay_literal() {
        let spec = PathSpec::parse("items.0");
        assert_eq!(spec.segments()[1], Segment::Literal("0".to_string()));
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["a", "a.b.c", "a.*.b", "*", "items.0.sku"] {
            assert_eq!(PathSpec::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_empty_component_is_a_literal() {
        let spec = PathSpec::parse("a..b");
        assert_eq!(spec.segments()[1], Segment::Literal(String::new()));
        assert_eq!(spec.to_string(), "a..b");
    }

    #[test]
    fn test_suffix_rendering() {
        let spec = PathSpec::parse("a.*.b");
        let rest: Vec<_> = spec.suffix(1).collect();
        assert_eq!(rest, vec!["*", "b"]);
    }
}
