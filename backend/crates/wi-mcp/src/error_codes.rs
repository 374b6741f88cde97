//! JSON-RPC 2.0 error codes used in responses.

/// Body is not valid JSON
pub const PARSE_ERROR: i64 = -32700;

/// JSON is not a valid request object, or the body is too large
pub const INVALID_REQUEST: i64 = -32600;

/// Unknown method or tool
pub const METHOD_NOT_FOUND: i64 = -32601;

/// Arguments failed deserialization or validation
pub const INVALID_PARAMS: i64 = -32602;

/// Unexpected server-side failure
pub const INTERNAL_ERROR: i64 = -32603;

/// Referenced work item does not exist
pub const NOT_FOUND: i64 = -32004;

/// Optimistic lock conflict - item was modified
pub const CONFLICT: i64 = -32009;
