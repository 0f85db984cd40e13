//! Per-frame stack configuration.

use scopestack_core::DEFAULT_FRAME_LABEL;

/// Settings for one cleanup stack.
///
/// Capacity is not part of the configuration: it is the stack's const
/// generic, fixed when the frame is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackConfig {
    /// Name of the owning frame, attached to every trace event
    pub label: &'static str,
    /// Emit a trace event for each registered and each executed action
    pub trace_actions: bool,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_FRAME_LABEL,
            trace_actions: true,
        }
    }
}

impl StackConfig {
    /// Create a config for the named frame
    pub fn for_frame(label: &'static str) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }

    /// Keep only the per-unwind summary events
    #[must_use]
    pub fn quiet(self) -> Self {
        Self {
            trace_actions: false,
            ..self
        }
    }
}
