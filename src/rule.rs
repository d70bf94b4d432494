//! The rule contract.
//!
//! A [`Rule`] exposes one mandatory operation, [`apply`](Rule::apply), and
//! two optional capabilities probed at runtime through defaulted methods:
//! [`bails`](Rule::bails) (stop the chain after a failure) and
//! [`expand`](Rule::expand) (replace this node with a dynamically computed
//! sub-rule list). Leaf-rule authors implement `apply` and nothing else.

use std::sync::Arc;

use crate::context::Context;
use crate::error::Rejection;
use crate::value::Value;

/// A shared handle to a rule, cheap to clone across every field a wildcard
/// path fans out to.
pub type RuleRef = Arc<dyn Rule>;

/// The result of applying one rule: the threaded value plus an optional
/// rejection.
///
/// The returned value always becomes the input to the next rule in the
/// chain, even when the rule rejects — rules may normalize while rejecting.
pub struct Outcome {
    pub(crate) value: Value,
    pub(crate) error: Option<Rejection>,
}

impl Outcome {
    /// The rule accepts; `value` is threaded to the next rule.
    pub fn pass(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            error: None,
        }
    }

    /// The rule rejects; `value` is still threaded to the next rule.
    pub fn fail(value: impl Into<Value>, rejection: impl Into<Rejection>) -> Self {
        Self {
            value: value.into(),
            error: Some(rejection.into()),
        }
    }

    /// The threaded value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The rejection, if the rule rejected.
    pub fn rejection(&self) -> Option<&Rejection> {
        self.error.as_ref()
    }
}

/// A unit of validation work in a rule chain.
///
/// # Example
///
/// ```rust
/// use gauntlet::{Context, Outcome, Rule, Value, ValidationError};
///
/// struct NonZero;
///
/// impl Rule for NonZero {
///     fn apply(&self, _ctx: &Context, value: Value, _root: &Value) -> Outcome {
///         if value.as_int() == Some(0) {
///             return Outcome::fail(value, ValidationError::new("non_zero", "must not be zero"));
///         }
///         Outcome::pass(value)
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Applies this rule to `value`, with `root` giving read access to the
    /// whole input for cross-field checks.
    ///
    /// Never invoked for composite rules: a node whose [`expand`](Rule::expand)
    /// returns `Some` is replaced by its expansion instead of being applied.
    fn apply(&self, ctx: &Context, value: Value, root: &Value) -> Outcome;

    /// Declares intent to stop the chain after a failure has occurred by
    /// this rule's turn. Defaults to false.
    fn bails(&self) -> bool {
        false
    }

    /// Declares this node composite by returning the sub-rule list to run
    /// in its place. Evaluated fresh at traversal time against the value as
    /// it stands immediately before this node's turn; `Some(vec![])` is a
    /// valid expansion that contributes nothing.
    ///
    /// Implementations must produce a finite tree; a composite that keeps
    /// expanding into itself never terminates.
    fn expand(&self, ctx: &Context, value: &Value, root: &Value) -> Option<Vec<RuleRef>> {
        let _ = (ctx, value, root);
        None
    }
}

/// Wraps a closure as a leaf rule.
///
/// # Example
///
/// ```rust
/// use gauntlet::{rule_fn, Outcome, ValidationError};
///
/// let positive = rule_fn(|_ctx, value, _root| {
///     if value.as_int().is_some_and(|n| n > 0) {
///         Outcome::pass(value)
///     } else {
///         Outcome::fail(value, ValidationError::new("positive", "must be positive"))
///     }
/// });
/// ```
pub fn rule_fn<F>(f: F) -> RuleRef
where
    F: Fn(&Context, Value, &Value) -> Outcome + Send + Sync + 'static,
{
    struct FnRule<F>(F);

    impl<F> Rule for FnRule<F>
    where
        F: Fn(&Context, Value, &Value) -> Outcome + Send + Sync,
    {
        fn apply(&self, ctx: &Context, value: Value, root: &Value) -> Outcome {
            (self.0)(ctx, value, root)
        }
    }

    Arc::new(FnRule(f))
}

/// Adds the bail capability to any rule: after a failure involving this
/// rule's turn, no further rule in the chain runs for that field.
pub fn bail(inner: RuleRef) -> RuleRef {
    struct BailRule {
        inner: RuleRef,
    }

    impl Rule for BailRule {
        fn apply(&self, ctx: &Context, value: Value, root: &Value) -> Outcome {
            self.inner.apply(ctx, value, root)
        }

        fn bails(&self) -> bool {
            true
        }

        fn expand(&self, ctx: &Context, value: &Value, root: &Value) -> Option<Vec<RuleRef>> {
            self.inner.expand(ctx, value, root)
        }
    }

    Arc::new(BailRule { inner })
}
