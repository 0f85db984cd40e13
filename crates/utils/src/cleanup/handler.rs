//! Drop guard for one piece of teardown logic
//!
//! `ScopedCleanup` covers the case of a single resource released when a block
//! ends. Frames that acquire several resources and need partial unwinds use a
//! cleanup stack instead; a guard can be converted into a stack entry with
//! [`ScopedCleanup::into_action`].

use scopestack_core::{CleanupAction, TRACE_TARGET};

/// Scoped cleanup guard that runs a function on drop
pub struct ScopedCleanup<F: FnOnce()> {
    description: Option<&'static str>,
    cleanup_fn: Option<F>,
}

impl<F: FnOnce()> ScopedCleanup<F> {
    /// Create a new scoped cleanup guard
    pub fn new(cleanup_fn: F) -> Self {
        Self {
            description: None,
            cleanup_fn: Some(cleanup_fn),
        }
    }

    /// Create a guard with a description used in trace output
    pub fn named(description: &'static str, cleanup_fn: F) -> Self {
        Self {
            description: Some(description),
            cleanup_fn: Some(cleanup_fn),
        }
    }

    /// Cancel the cleanup
    pub fn cancel(mut self) {
        if let Some(description) = self.description {
            tracing::trace!(target: TRACE_TARGET, description, "scoped cleanup cancelled");
        }
        self.cleanup_fn = None;
    }

    /// Hand the pending cleanup over to a cleanup stack.
    ///
    /// The guard is disarmed; the returned action runs when the stack unwinds.
    pub fn into_action<'a>(mut self) -> CleanupAction<'a>
    where
        F: 'a,
    {
        match (self.cleanup_fn.take(), self.description) {
            (Some(cleanup_fn), Some(description)) => CleanupAction::named(description, cleanup_fn),
            (Some(cleanup_fn), None) => CleanupAction::new(cleanup_fn),
            // Only `cancel` and `drop` clear the closure, and both consume the guard
            (None, _) => CleanupAction::new(|| {}),
        }
    }
}

impl<F: FnOnce()> Drop for ScopedCleanup<F> {
    fn drop(&mut self) {
        if let Some(cleanup_fn) = self.cleanup_fn.take() {
            tracing::trace!(
                target: TRACE_TARGET,
                description = self.description.unwrap_or("<unnamed>"),
                "running scoped cleanup"
            );
            cleanup_fn();
        }
    }
}
