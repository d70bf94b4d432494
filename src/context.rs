//! Execution context passed to every rule application.
//!
//! The context carries a shared cancellation flag that long-running rule
//! implementations may consult. The engine itself never aborts a chain on
//! cancellation; reacting to the flag is a rule-author responsibility.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared execution state for one family of validation calls.
///
/// Cloning a context shares the underlying flag, so a clone handed to
/// another thread can cancel rules running here.
///
/// # Example
///
/// ```rust
/// use gauntlet::Context;
///
/// let ctx = Context::new();
/// assert!(!ctx.is_cancelled());
///
/// ctx.cancel();
/// assert!(ctx.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancelled: Arc<AtomicBool>,
}

impl Context {
    /// Creates a fresh, non-cancelled context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Rules observe this via
    /// [`is_cancelled`](Context::is_cancelled); the engine does not.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_flag() {
        let ctx = Context::new();
        let clone = ctx.clone();

        clone.cancel();
        assert!(ctx.is_cancelled());
    }
}
