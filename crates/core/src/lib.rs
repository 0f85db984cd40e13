//! Core errors, types and constants shared by the `scopestack` crates.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum describing the two ways a cleanup stack can
//!   be misused, and the `Result` alias used by the fallible API forms.
//! - **`types`**: `CleanupAction`, the boxed teardown closure a stack stores.
//! - **`constants`**: tracing target, environment variable names and defaults.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::CleanupAction,
};
