/// Constants used throughout the scopestack crates
// Tracing target for every event emitted by a cleanup stack
pub const TRACE_TARGET: &str = "scopestack";

// Environment variables consulted when installing the log subscriber
pub const SCOPESTACK_LOG_VAR: &str = "SCOPESTACK_LOG";
pub const RUST_LOG_VAR: &str = "RUST_LOG";

// Filter used when neither variable is set
pub const DEFAULT_LOG_FILTER: &str = "warn";

// Label given to a stack created without an explicit configuration
pub const DEFAULT_FRAME_LABEL: &str = "frame";
