//! Guard for a nested scope on a cleanup stack
//!
//! A `Scope` takes a marker when it is created and unwinds back to it when it
//! is dropped, so leaving a block by falling through, `break`, `continue` or
//! `?` releases exactly the resources the block registered. The enclosing
//! frame keeps its own pending actions.

use crate::stack::{CleanupStack, ScopeMarker};
use scopestack_core::{CleanupAction, Result};

/// Nested scope borrowing a [`CleanupStack`].
///
/// While the guard lives the stack is only reachable through it, so actions
/// pushed here always belong to this scope and inner scopes always close
/// before outer ones.
#[must_use = "dropping a scope immediately unwinds it"]
pub struct Scope<'s, 'a, const N: usize> {
    stack: &'s mut CleanupStack<'a, N>,
    marker: Option<ScopeMarker>,
}

impl<'s, 'a, const N: usize> Scope<'s, 'a, N> {
    pub(crate) fn new(stack: &'s mut CleanupStack<'a, N>) -> Self {
        let marker = stack.mark_scope();
        Self {
            stack,
            marker: Some(marker),
        }
    }

    /// Register a cleanup owned by this scope.
    ///
    /// # Panics
    ///
    /// Panics if the frame's stack is full.
    #[track_caller]
    pub fn push<F>(&mut self, action: F)
    where
        F: FnOnce() + 'a,
    {
        self.stack.push(action);
    }

    /// Register a described cleanup owned by this scope.
    ///
    /// # Panics
    ///
    /// Panics if the frame's stack is full.
    #[track_caller]
    pub fn push_named<F>(&mut self, description: &'static str, action: F)
    where
        F: FnOnce() + 'a,
    {
        self.stack.push_named(description, action);
    }

    /// Register an already built action.
    ///
    /// # Panics
    ///
    /// Panics if the frame's stack is full.
    #[track_caller]
    pub fn push_action(&mut self, action: CleanupAction<'a>) {
        self.stack.push_action(action);
    }

    pub fn try_push<F>(&mut self, action: F) -> Result<()>
    where
        F: FnOnce() + 'a,
    {
        self.stack.try_push(action)
    }

    pub fn try_push_named<F>(&mut self, description: &'static str, action: F) -> Result<()>
    where
        F: FnOnce() + 'a,
    {
        self.stack.try_push_named(description, action)
    }

    pub fn try_push_action(&mut self, action: CleanupAction<'a>) -> Result<()> {
        self.stack.try_push_action(action)
    }

    /// Actions pending in the whole frame
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Actions registered by this scope and its open inner scopes
    pub fn scope_len(&self) -> usize {
        self.live_marker()
            .map_or(0, |marker| self.stack.len() - marker.position())
    }

    /// Free slots left in the frame's stack
    pub fn remaining(&self) -> usize {
        self.stack.remaining()
    }

    /// Nesting level, 1 for a scope opened directly on the stack
    pub fn depth(&self) -> usize {
        self.live_marker().map_or(0, ScopeMarker::depth)
    }

    /// Open a scope nested inside this one
    pub fn scope(&mut self) -> Scope<'_, 'a, N> {
        Scope::new(&mut *self.stack)
    }

    /// Leave the scope now, releasing its resources.
    ///
    /// Returns the number of actions run. Equivalent to dropping the guard.
    pub fn end(mut self) -> usize {
        self.close()
    }

    /// Leave the whole frame from inside this scope.
    ///
    /// Unwinds every pending action on the stack, including those registered
    /// outside the scope, and returns `value` for the caller to `return`.
    /// Enclosing scope guards that are still alive close without running
    /// anything when they drop.
    pub fn exit_frame<T>(mut self, value: T) -> T {
        self.marker = None;
        self.stack.unwind_all();
        value
    }

    fn live_marker(&self) -> Option<&ScopeMarker> {
        self.marker
            .as_ref()
            .filter(|marker| !self.stack.frame_exited_since(marker))
    }

    fn close(&mut self) -> usize {
        match self.marker.take() {
            // An inner scope already left the frame and retired this marker
            Some(marker) if self.stack.frame_exited_since(&marker) => 0,
            Some(marker) => self.stack.unwind_to_marker(marker),
            None => 0,
        }
    }
}

impl<const N: usize> Drop for Scope<'_, '_, N> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use crate::CleanupStack;
    use std::cell::RefCell;

    #[test]
    fn test_scope_drop_unwinds_only_scope() {
        let log = RefCell::new(Vec::new());
        let mut stack = CleanupStack::<3>::new();
        stack.push(|| log.borrow_mut().push("A"));

        {
            let mut scope = stack.scope();
            scope.push(|| log.borrow_mut().push("B"));
            scope.push(|| log.borrow_mut().push("C"));
            assert_eq!(scope.scope_len(), 2);
            assert_eq!(scope.len(), 3);
            assert_eq!(scope.depth(), 1);
        }

        assert_eq!(*log.borrow(), ["C", "B"]);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_end_reports_count() {
        let mut stack = CleanupStack::<2>::new();
        let mut scope = stack.scope();
        scope.push(|| {});
        scope.push(|| {});
        assert_eq!(scope.end(), 2);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_nested_scopes_unwind_innermost_first() {
        let log = RefCell::new(Vec::new());
        let mut stack = CleanupStack::<4>::new();
        stack.push(|| log.borrow_mut().push("frame"));

        {
            let mut outer = stack.scope();
            outer.push(|| log.borrow_mut().push("outer"));
            {
                let mut inner = outer.scope();
                assert_eq!(inner.depth(), 2);
                inner.push(|| log.borrow_mut().push("inner"));
            }
            assert_eq!(*log.borrow(), ["inner"]);
            outer.push(|| log.borrow_mut().push("outer-late"));
        }

        assert_eq!(*log.borrow(), ["inner", "outer-late", "outer"]);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_exit_frame_unwinds_everything() {
        let log = RefCell::new(Vec::new());
        let mut stack = CleanupStack::<3>::new();
        stack.push(|| log.borrow_mut().push("A"));
        stack.push(|| log.borrow_mut().push("B"));

        let value = {
            let mut scope = stack.scope();
            scope.push(|| log.borrow_mut().push("C"));
            scope.exit_frame(42)
        };

        assert_eq!(value, 42);
        assert_eq!(*log.borrow(), ["C", "B", "A"]);
        assert!(stack.is_empty());
        assert_eq!(stack.depth(), 0);
    }

    fn leave_from_inner(log: &RefCell<Vec<&'static str>>) -> u32 {
        let mut stack = CleanupStack::<3>::new();
        stack.push(|| log.borrow_mut().push("A"));

        let mut outer = stack.scope();
        outer.push(|| log.borrow_mut().push("B"));
        {
            let mut inner = outer.scope();
            inner.push(|| log.borrow_mut().push("C"));
            return inner.exit_frame(7);
        }
    }

    #[test]
    fn test_exit_frame_from_nested_scope_with_live_outer_guard() {
        let log = RefCell::new(Vec::new());

        assert_eq!(leave_from_inner(&log), 7);
        assert_eq!(*log.borrow(), ["C", "B", "A"]);
    }

    #[test]
    fn test_outer_scope_after_inner_exit_frame_runs_nothing_more() {
        let log = RefCell::new(Vec::new());
        let mut stack = CleanupStack::<3>::new();
        stack.push(|| log.borrow_mut().push("A"));

        let mut outer = stack.scope();
        outer.push(|| log.borrow_mut().push("B"));
        let mut inner = outer.scope();
        inner.push(|| log.borrow_mut().push("C"));
        inner.exit_frame(());
        assert_eq!(*log.borrow(), ["C", "B", "A"]);

        assert_eq!(outer.scope_len(), 0);
        assert_eq!(outer.depth(), 0);
        assert_eq!(outer.end(), 0);
        assert!(stack.is_empty());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_scope_try_push_overflow() {
        let mut stack = CleanupStack::<1>::new();
        let mut scope = stack.scope();
        scope.try_push(|| {}).unwrap();
        assert_eq!(scope.remaining(), 0);
        let err = scope.try_push_named("extra", || {}).unwrap_err();
        assert!(err.is_capacity_exceeded());
    }
}
