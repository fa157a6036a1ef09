//! Canonical schema constants for structured logging
//!
//! Log events and error reports use these keys so captured output stays
//! stable across the crates of the workspace.

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Widget binding
pub const FIELD_WIDGET_ID: &str = "widget_id";
pub const FIELD_WIDGET_KIND: &str = "widget_kind";
pub const FIELD_AFFORDANCE: &str = "affordance";

// Result sizes
pub const FIELD_CANDIDATE_COUNT: &str = "candidate_count";
pub const FIELD_OPERATION_COUNT: &str = "operation_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
