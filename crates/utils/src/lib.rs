//! Shared utilities for scopestack
//!
//! Holds the pieces that are useful on their own, outside a cleanup stack:
//! a single-action drop guard and the log subscriber setup.

pub mod cleanup;
pub mod logging;

pub use cleanup::*;
