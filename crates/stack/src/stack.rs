//! The frame-local cleanup stack
//!
//! A `CleanupStack` records the teardown of every resource a frame acquires,
//! in acquisition order, and runs them last-in first-out when the frame or one
//! of its nested scopes is left. Storage is an inline array sized by the const
//! generic, so registering an action never reallocates and the number of
//! pending actions can never exceed what the frame declared.

use crate::config::StackConfig;
use crate::scope::Scope;
use scopestack_core::{CleanupAction, Error, Result, TRACE_TARGET};
use smallvec::SmallVec;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

const UNNAMED: &str = "<unnamed>";

// Scope ids are unique across every stack in the process
static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(0);

/// Saved stack position delimiting a nested scope.
///
/// Returned by [`CleanupStack::mark_scope`] and consumed by
/// [`CleanupStack::unwind_to_marker`]. Markers cannot be cloned, and each
/// carries the id of the scope it opened, so a stack only accepts a marker
/// while that exact scope is still open.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a scope marker is needed to unwind the scope it opened"]
pub struct ScopeMarker {
    id: u64,
    cursor: usize,
    depth: usize,
    frame_exits: u64,
}

impl ScopeMarker {
    /// Number of actions that were pending when the scope opened
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Nesting level of the scope, starting at 1 for the outermost
    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[derive(Debug, Clone, Copy)]
enum Unwind {
    Scope,
    Frame,
}

impl Unwind {
    fn as_str(self) -> &'static str {
        match self {
            Unwind::Scope => "scope",
            Unwind::Frame => "frame",
        }
    }
}

/// Fixed-capacity LIFO registry of cleanup actions owned by one frame.
///
/// `N` is the largest number of actions the frame may have pending at once.
/// Dropping the stack runs every action still pending, so falling off the end
/// of the frame, returning early or propagating an error with `?` all release
/// what was acquired.
///
/// ```
/// use scopestack::CleanupStack;
/// use std::cell::RefCell;
///
/// let log = RefCell::new(Vec::new());
/// {
///     let mut stack = CleanupStack::<2>::new();
///     stack.push(|| log.borrow_mut().push("A"));
///     stack.push(|| log.borrow_mut().push("B"));
/// }
/// assert_eq!(*log.borrow(), ["B", "A"]);
/// ```
pub struct CleanupStack<'a, const N: usize> {
    slots: [Option<CleanupAction<'a>>; N],
    cursor: usize,
    // Ids of the open scopes, outermost first
    open_scopes: SmallVec<[u64; 8]>,
    // Number of frame-wide unwinds so far
    frame_exits: u64,
    config: StackConfig,
    // Frame-local: the stack must not leave the thread that owns the frame
    _frame: PhantomData<*const ()>,
}

impl<'a, const N: usize> CleanupStack<'a, N> {
    /// Create an empty stack with the default configuration
    pub fn new() -> Self {
        Self::with_config(StackConfig::default())
    }

    /// Create an empty stack for a configured frame
    pub fn with_config(config: StackConfig) -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            cursor: 0,
            open_scopes: SmallVec::new(),
            frame_exits: 0,
            config,
            _frame: PhantomData,
        }
    }

    /// Maximum number of pending actions
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of pending actions
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Number of free slots
    pub fn remaining(&self) -> usize {
        N - self.cursor
    }

    /// Number of scopes currently open on this stack
    pub fn depth(&self) -> usize {
        self.open_scopes.len()
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Descriptions of the pending actions, next to run first
    pub fn pending_descriptions(&self) -> impl Iterator<Item = Option<&'static str>> + '_ {
        self.slots[..self.cursor]
            .iter()
            .rev()
            .map(|slot| slot.as_ref().and_then(|action| action.description()))
    }

    /// Register the teardown of the most recently acquired resource.
    ///
    /// # Panics
    ///
    /// Panics if all `N` slots are pending.
    #[track_caller]
    pub fn push<F>(&mut self, action: F)
    where
        F: FnOnce() + 'a,
    {
        self.push_action(CleanupAction::new(action));
    }

    /// Like [`push`](Self::push), with a description shown in trace output.
    ///
    /// # Panics
    ///
    /// Panics if all `N` slots are pending.
    #[track_caller]
    pub fn push_named<F>(&mut self, description: &'static str, action: F)
    where
        F: FnOnce() + 'a,
    {
        self.push_action(CleanupAction::named(description, action));
    }

    /// Register an already built action.
    ///
    /// # Panics
    ///
    /// Panics if all `N` slots are pending.
    #[track_caller]
    pub fn push_action(&mut self, action: CleanupAction<'a>) {
        if let Err(err) = self.try_push_action(action) {
            self.fatal(err);
        }
    }

    /// Fallible form of [`push`](Self::push).
    ///
    /// On overflow the action is dropped without running and
    /// [`Error::CapacityExceeded`] is returned.
    pub fn try_push<F>(&mut self, action: F) -> Result<()>
    where
        F: FnOnce() + 'a,
    {
        self.try_push_action(CleanupAction::new(action))
    }

    /// Fallible form of [`push_named`](Self::push_named).
    pub fn try_push_named<F>(&mut self, description: &'static str, action: F) -> Result<()>
    where
        F: FnOnce() + 'a,
    {
        self.try_push_action(CleanupAction::named(description, action))
    }

    /// Fallible form of [`push_action`](Self::push_action).
    pub fn try_push_action(&mut self, action: CleanupAction<'a>) -> Result<()> {
        if self.cursor == N {
            return Err(Error::capacity_exceeded(N));
        }

        if self.config.trace_actions {
            tracing::trace!(
                target: TRACE_TARGET,
                frame = self.config.label,
                slot = self.cursor,
                description = action.description().unwrap_or(UNNAMED),
                "cleanup registered"
            );
        }

        self.slots[self.cursor] = Some(action);
        self.cursor += 1;
        Ok(())
    }

    /// Open a nested scope and return its marker.
    ///
    /// Pair every marker with exactly one [`unwind_to_marker`](Self::unwind_to_marker),
    /// or let a later [`unwind_all`](Self::unwind_all) retire it. [`scope`](Self::scope)
    /// does the pairing automatically.
    pub fn mark_scope(&mut self) -> ScopeMarker {
        let id = NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed);
        self.open_scopes.push(id);
        tracing::trace!(
            target: TRACE_TARGET,
            frame = self.config.label,
            depth = self.open_scopes.len(),
            slot = self.cursor,
            "scope opened"
        );
        ScopeMarker {
            id,
            cursor: self.cursor,
            depth: self.open_scopes.len(),
            frame_exits: self.frame_exits,
        }
    }

    /// Whether the scope `marker` opened is still open on this stack
    pub fn is_open(&self, marker: &ScopeMarker) -> bool {
        marker
            .depth
            .checked_sub(1)
            .and_then(|index| self.open_scopes.get(index))
            == Some(&marker.id)
            && marker.cursor <= self.cursor
    }

    /// Whether a frame-wide unwind ran after `marker` was taken
    pub(crate) fn frame_exited_since(&self, marker: &ScopeMarker) -> bool {
        marker.frame_exits != self.frame_exits
    }

    /// Run the actions pushed since `marker` was taken, newest first.
    ///
    /// Closes the marker's scope along with any scope opened inside it and
    /// returns the number of actions run. Actions pushed before the marker stay
    /// pending.
    ///
    /// # Panics
    ///
    /// Panics if the marker's scope is no longer open, for example after an
    /// [`unwind_all`](Self::unwind_all) or after an enclosing marker was
    /// unwound, or if the marker belongs to another stack.
    #[track_caller]
    pub fn unwind_to_marker(&mut self, marker: ScopeMarker) -> usize {
        match self.try_unwind_to_marker(marker) {
            Ok(ran) => ran,
            Err(err) => self.fatal(err),
        }
    }

    /// Fallible form of [`unwind_to_marker`](Self::unwind_to_marker).
    ///
    /// Nothing runs when [`Error::UnbalancedMarker`] is returned.
    pub fn try_unwind_to_marker(&mut self, marker: ScopeMarker) -> Result<usize> {
        if !self.is_open(&marker) {
            return Err(Error::unbalanced_marker(
                marker.cursor,
                marker.depth,
                self.cursor,
                self.open_scopes.len(),
            ));
        }

        self.open_scopes.truncate(marker.depth - 1);
        Ok(self.unwind_until(marker.cursor, Unwind::Scope))
    }

    /// Run every pending action, newest first, and close all scopes.
    ///
    /// Returns the number of actions run; zero on an empty stack.
    pub fn unwind_all(&mut self) -> usize {
        self.open_scopes.clear();
        self.frame_exits += 1;
        self.unwind_until(0, Unwind::Frame)
    }

    /// Open a nested scope whose actions are unwound when the guard is dropped.
    ///
    /// ```
    /// use scopestack::CleanupStack;
    /// use std::cell::RefCell;
    ///
    /// let log = RefCell::new(Vec::new());
    /// let mut stack = CleanupStack::<3>::new();
    /// stack.push(|| log.borrow_mut().push("outer"));
    /// for round in 0..3 {
    ///     let mut scope = stack.scope();
    ///     scope.push(|| log.borrow_mut().push("inner"));
    ///     if round == 1 {
    ///         break;
    ///     }
    /// }
    /// assert_eq!(*log.borrow(), ["inner", "inner"]);
    /// assert_eq!(stack.len(), 1);
    /// ```
    pub fn scope(&mut self) -> Scope<'_, 'a, N> {
        Scope::new(self)
    }

    /// Unwind the whole frame, then hand `value` back for returning.
    pub fn finish<T>(mut self, value: T) -> T {
        self.unwind_all();
        value
    }

    fn unwind_until(&mut self, floor: usize, kind: Unwind) -> usize {
        let mut ran = 0;

        while self.cursor > floor {
            // Retire the slot before running it so a panicking action is never re-run
            self.cursor -= 1;
            if let Some(action) = self.slots[self.cursor].take() {
                if self.config.trace_actions {
                    tracing::trace!(
                        target: TRACE_TARGET,
                        frame = self.config.label,
                        slot = self.cursor,
                        kind = kind.as_str(),
                        description = action.description().unwrap_or(UNNAMED),
                        "running cleanup"
                    );
                }
                action.run();
                ran += 1;
            }
        }

        if ran > 0 {
            tracing::debug!(
                target: TRACE_TARGET,
                frame = self.config.label,
                kind = kind.as_str(),
                ran,
                pending = self.cursor,
                "cleanup stack unwound"
            );
        }

        ran
    }

    #[cold]
    #[track_caller]
    fn fatal(&self, err: Error) -> ! {
        tracing::error!(
            target: TRACE_TARGET,
            frame = self.config.label,
            error = %err,
            "cleanup stack misuse"
        );
        panic!("{err}");
    }
}

impl<const N: usize> Default for CleanupStack<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Drop for CleanupStack<'_, N> {
    fn drop(&mut self) {
        self.unwind_all();
    }
}

impl<const N: usize> fmt::Debug for CleanupStack<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanupStack")
            .field("label", &self.config.label)
            .field("len", &self.cursor)
            .field("capacity", &N)
            .field("depth", &self.open_scopes.len())
            .finish()
    }
}
