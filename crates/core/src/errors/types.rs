//! Core error type definitions

/// Result type alias for fallible cleanup stack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Misuse of a cleanup stack.
///
/// Both variants are programmer errors. The panicking API forms report them
/// as fatal; the `try_*` forms hand them back so callers and tests can inspect
/// them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A push found every slot already occupied
    CapacityExceeded { capacity: usize },

    /// A scope marker that is no longer pending was used to unwind
    UnbalancedMarker {
        marker_cursor: usize,
        marker_depth: usize,
        cursor: usize,
        depth: usize,
    },
}
