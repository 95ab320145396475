//! Canonical schema constants for structured logging and events
//!
//! Every diagnostic emitted by the comparators uses these keys so that log
//! pipelines can filter on a stable vocabulary.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Comparison context
pub const FIELD_KIND: &str = "kind";
pub const FIELD_RESOURCE: &str = "resource";
pub const FIELD_FIELD: &str = "field";
pub const FIELD_SIDE: &str = "side";
pub const FIELD_DIFF_LEN: &str = "diff_len";
pub const FIELD_EQUIVALENT: &str = "equivalent";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
/// Key `tracing` records the formatted event message under
pub const FIELD_MESSAGE: &str = "message";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Document sides
pub const SIDE_OLD: &str = "old";
pub const SIDE_NEW: &str = "new";
