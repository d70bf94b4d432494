//! Depth-first traversal of lazily discovered rule trees.
//!
//! A rule list is flat until a composite node is reached; at that point the
//! node is replaced, at traversal time, by a cursor over its expansion, and
//! the parent list resumes when the expansion is exhausted. [`RuleWalk`]
//! presents this as a single linear pre-order walk, so the execution engine
//! can treat an arbitrarily nested chain exactly like a flat list.
//!
//! The tree is never materialized up front: expansions may depend on the
//! threaded value as it stands mid-walk, and unexpanded branches are never
//! computed.

use crate::context::Context;
use crate::rule::RuleRef;
use crate::value::Value;

/// Positional cursor over one ordered rule list.
struct Cursor {
    rules: Vec<RuleRef>,
    pos: usize,
}

impl Cursor {
    fn new(rules: Vec<RuleRef>) -> Self {
        Self { rules, pos: 0 }
    }

    fn current(&self) -> Option<&RuleRef> {
        self.rules.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }
}

/// A depth-first, pre-order walk over a rule chain whose shape is
/// discovered lazily.
///
/// Construction normalizes the position immediately, so
/// [`has_current`](RuleWalk::has_current) is accurate before the first
/// [`current`](RuleWalk::current) call. After processing the exposed leaf,
/// the consumer calls [`advance`](RuleWalk::advance) with the value as it
/// stands, which the next composite's expansion will observe.
pub struct RuleWalk {
    active: Cursor,
    stack: Vec<Cursor>,
}

impl RuleWalk {
    /// Builds a walk over `rules`, normalizing against the seed `value`.
    pub fn new(ctx: &Context, rules: Vec<RuleRef>, value: &Value, root: &Value) -> Self {
        let mut walk = Self {
            active: Cursor::new(rules),
            stack: Vec::new(),
        };
        walk.normalize(ctx, value, root);
        walk
    }

    /// The currently exposed leaf rule, if the walk is not exhausted.
    pub fn current(&self) -> Option<&RuleRef> {
        self.active.current()
    }

    /// Returns true while a leaf rule is exposed.
    pub fn has_current(&self) -> bool {
        self.active.current().is_some()
    }

    /// Moves past the exposed leaf and re-normalizes. `value` is the
    /// threaded value after the leaf's application.
    pub fn advance(&mut self, ctx: &Context, value: &Value, root: &Value) {
        self.active.advance();
        self.normalize(ctx, value, root);
    }

    /// Repositions until the active cursor exposes a leaf rule or every
    /// cursor is exhausted.
    ///
    /// Composite nodes are expanded here: the active cursor is advanced
    /// past the node (so the parent resumes after it when popped later),
    /// pushed, and replaced by a fresh cursor over the expansion, which may
    /// be empty to arbitrary nesting depth.
    fn normalize(&mut self, ctx: &Context, value: &Value, root: &Value) {
        loop {
            if self.active.current().is_none() {
                match self.stack.pop() {
                    Some(parent) => {
                        self.active = parent;
                        continue;
                    }
                    // Terminal: the walk is exhausted.
                    None => return,
                }
            }

            let expansion = self
                .active
                .current()
                .and_then(|rule| rule.expand(ctx, value, root));

            match expansion {
                Some(sub_rules) => {
                    self.active.advance();
                    let parent = std::mem::replace(&mut self.active, Cursor::new(sub_rules));
                    self.stack.push(parent);
                }
                // Leaf exposed.
                None => return,
            }
        }
    }
}
