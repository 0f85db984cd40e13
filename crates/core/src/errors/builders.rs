//! Builder methods for creating errors with context

use super::types::Error;

impl Error {
    /// Create a capacity exceeded error
    #[must_use]
    pub fn capacity_exceeded(capacity: usize) -> Self {
        Error::CapacityExceeded { capacity }
    }

    /// Create an unbalanced marker error from the marker's and the stack's positions
    #[must_use]
    pub fn unbalanced_marker(
        marker_cursor: usize,
        marker_depth: usize,
        cursor: usize,
        depth: usize,
    ) -> Self {
        Error::UnbalancedMarker {
            marker_cursor,
            marker_depth,
            cursor,
            depth,
        }
    }

    /// Whether this error reports a capacity overflow
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, Error::CapacityExceeded { .. })
    }

    /// Whether this error reports a stale or foreign scope marker
    pub fn is_unbalanced_marker(&self) -> bool {
        matches!(self, Error::UnbalancedMarker { .. })
    }
}
