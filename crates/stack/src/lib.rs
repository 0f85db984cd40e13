//! Fixed-capacity cleanup stacks for frames that acquire several resources.
//!
//! A frame declares up front how many resources it may hold at once, then
//! registers the teardown of each resource right after acquiring it. When the
//! frame ends every pending teardown runs in reverse order of registration.
//! Nested scopes can release just their own resources early, leaving the rest
//! of the frame's cleanups pending.
//!
//! ## Key Components
//!
//! - **`CleanupStack`**: the per-frame LIFO registry with `push`, `mark_scope`,
//!   `unwind_to_marker` and `unwind_all`. Dropping it unwinds everything.
//! - **`Scope`**: a guard over a nested scope; dropping it unwinds back to the
//!   point where it was opened.
//! - **`StackConfig`**: frame label and trace verbosity.
//! - **`cleanup_stack!` / `push_cleanup!`**: declaration shorthands.
//!
//! ## Exits
//!
//! | Leaving... | Use | Runs |
//! |------------|-----|------|
//! | a nested block (fall-through, `break`, `continue`, `?`) | drop the `Scope` or call `Scope::end` | the scope's actions |
//! | the frame from inside a scope | `Scope::exit_frame(value)` | every pending action |
//! | the frame | drop the stack or call `CleanupStack::finish(value)` | every pending action |
//!
//! Overflowing the declared capacity and unwinding to a marker whose scope is
//! already closed are programming errors: the plain methods panic, the `try_*`
//! methods return [`Error`]. Cleanup actions are expected not to fail; an
//! action that panics is retired before it runs, so it is never repeated and
//! the remaining actions still run when the stack is dropped. A panic raised
//! by an action while the thread is already unwinding aborts the process.
//!
//! ```
//! use scopestack::CleanupStack;
//! use std::cell::RefCell;
//!
//! fn copy_records(log: &RefCell<Vec<String>>, fail_at: usize) -> Result<usize, String> {
//!     let mut stack = CleanupStack::<3>::new();
//!     log.borrow_mut().push("open source".into());
//!     stack.push(|| log.borrow_mut().push("close source".into()));
//!     log.borrow_mut().push("open sink".into());
//!     stack.push(|| log.borrow_mut().push("close sink".into()));
//!
//!     for record in 0..3 {
//!         let mut scope = stack.scope();
//!         scope.push(move || log.borrow_mut().push(format!("free buffer {record}")));
//!         if record == fail_at {
//!             return Err(format!("record {record} is corrupt"));
//!         }
//!     }
//!     Ok(stack.finish(3))
//! }
//!
//! let log = RefCell::new(Vec::new());
//! assert!(copy_records(&log, 1).is_err());
//! assert_eq!(
//!     *log.borrow(),
//!     ["open source", "open sink", "free buffer 0", "free buffer 1", "close sink", "close source"]
//! );
//! ```

mod config;
mod macros;
mod scope;
mod stack;

#[cfg(test)]
mod tests_proptest;

pub use config::StackConfig;
pub use scope::Scope;
pub use stack::{CleanupStack, ScopeMarker};

pub use scopestack_core::{CleanupAction, Error, Result};
pub use scopestack_utils::{logging, ScopedCleanup};
