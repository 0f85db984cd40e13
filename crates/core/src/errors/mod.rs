//! Error types for cleanup stack misuse

mod builders;
mod display;
mod types;

pub use types::{Error, Result};
