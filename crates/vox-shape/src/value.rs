//! Runtime classification of decoded JSON values.
//!
//! [`kind_of`] names what a value *is*, for mismatch reporting. Matching
//! against an expected kind lives in [`crate::matcher`]; the split keeps
//! "what did we observe" independent from "what did the schema want".

use serde_json::Value;

/// The observed runtime kind of a decoded JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// JSON string.
    String,
    /// JSON number representable as `i64`/`u64`.
    Integer,
    /// JSON number carrying a fractional representation.
    Float,
    /// JSON boolean.
    Boolean,
    /// JSON null.
    Null,
    /// JSON object.
    Map,
    /// JSON array.
    Sequence,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "String"),
            Self::Integer => write!(f, "Integer"),
            Self::Float => write!(f, "Float"),
            Self::Boolean => write!(f, "Boolean"),
            Self::Null => write!(f, "Null"),
            Self::Map => write!(f, "Map"),
            Self::Sequence => write!(f, "Sequence"),
        }
    }
}

/// Classify a decoded JSON value by runtime kind.
pub fn kind_of(value: &Value) -> ValueKind {
    match value {
        Value::Null => ValueKind::Null,
        Value::Bool(_) => ValueKind::Boolean,
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                ValueKind::Integer
            } else {
                ValueKind::Float
            }
        }
        Value::String(_) => ValueKind::String,
        Value::Array(_) => ValueKind::Sequence,
        Value::Object(_) => ValueKind::Map,
    }
}

/// Whether a string parses as a provider timestamp.
///
/// JSON has no native timestamp type; VoxCLOUD serializes timestamps as
/// strings in either RFC 3339 (`2026-08-27T10:00:00Z`) or the legacy
/// space-separated form (`2026-08-27 10:00:00`).
pub(crate) fn is_timestamp(s: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(s).is_ok()
        || chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok()
}
