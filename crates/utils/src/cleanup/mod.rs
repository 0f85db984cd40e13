//! Single-action cleanup guards.

mod handler;

pub use handler::ScopedCleanup;
