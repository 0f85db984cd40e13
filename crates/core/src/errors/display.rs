//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityExceeded { capacity } => {
                write!(
                    f,
                    "cleanup stack capacity exceeded: all {capacity} slots are pending"
                )
            }
            Error::UnbalancedMarker {
                marker_cursor,
                marker_depth,
                cursor,
                depth,
            } => {
                write!(
                    f,
                    "unbalanced scope marker (slot {marker_cursor}, depth {marker_depth}) \
                     for stack at slot {cursor} with {depth} open scope(s)"
                )
            }
        }
    }
}
