//! Declarative shape schemas.
//!
//! [`SchemaNode`] is the closed set of shape descriptions the matcher
//! understands. Fixture code builds schemas with the constructor DSL
//! ([`SchemaNode::map`], [`SchemaNode::seq`], ...); schemas may also be
//! parsed from a JSON descriptor literal with
//! [`SchemaNode::from_descriptor`], which is where the only fatal error
//! in this crate lives: an unrecognized descriptor is a programmer
//! error, surfaced as [`SchemaError::Malformed`] at construction time
//! and never at validation time.

use serde_json::Value;

/// Expected leaf kind for a scalar schema position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Any JSON string.
    String,
    /// A JSON number representable as `i64`/`u64`.
    ///
    /// serde_json distinguishes integral from fractional numbers, so the
    /// schema language does too: `Integer` rejects `1.5` but accepts `1`.
    Integer,
    /// Any JSON number. Providers serialize `1.0` as `1`, so an integral
    /// literal in a `Float` position conforms.
    Float,
    /// A JSON boolean.
    Boolean,
    /// A JSON string parsing as a provider timestamp (RFC 3339 or the
    /// legacy `YYYY-MM-DD HH:MM:SS` form).
    Time,
    /// JSON null.
    Null,
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "String"),
            Self::Integer => write!(f, "Integer"),
            Self::Float => write!(f, "Float"),
            Self::Boolean => write!(f, "Boolean"),
            Self::Time => write!(f, "Time"),
            Self::Null => write!(f, "Null"),
        }
    }
}

/// A declarative description of expected shape for a data value.
///
/// Schemas are immutable trees, built once per test group and passed by
/// reference into each validation call. Cycle-freedom is guaranteed by
/// construction (`Box`ed children, no interior mutability).
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// The value's runtime kind must equal the given leaf kind.
    Scalar(ScalarKind),
    /// The value is either JSON null — or, in a map field position, an
    /// absent key — or satisfies the inner schema.
    Nullable(Box<SchemaNode>),
    /// The value is a map containing *at minimum* the declared keys,
    /// each conforming to its schema. Undeclared keys are ignored (open
    /// schema). Declaration order is preserved for deterministic error
    /// paths.
    Map(Vec<(String, SchemaNode)>),
    /// The value is a sequence. `None` asserts shape only ("is a
    /// sequence", elements unchecked); `Some` requires every element to
    /// conform, in index order.
    Seq(Option<Box<SchemaNode>>),
}

impl SchemaNode {
    /// Expect a JSON string.
    pub fn string() -> Self {
        Self::Scalar(ScalarKind::String)
    }

    /// Expect an integral JSON number.
    pub fn integer() -> Self {
        Self::Scalar(ScalarKind::Integer)
    }

    /// Expect any JSON number.
    pub fn float() -> Self {
        Self::Scalar(ScalarKind::Float)
    }

    /// Expect a JSON boolean.
    pub fn boolean() -> Self {
        Self::Scalar(ScalarKind::Boolean)
    }

    /// Expect a string parsing as a provider timestamp.
    pub fn time() -> Self {
        Self::Scalar(ScalarKind::Time)
    }

    /// Expect JSON null.
    pub fn null() -> Self {
        Self::Scalar(ScalarKind::Null)
    }

    /// Accept null/absent, or a value conforming to `inner`.
    pub fn nullable(inner: SchemaNode) -> Self {
        Self::Nullable(Box::new(inner))
    }

    /// Expect a map containing at minimum the given keys.
    pub fn map<K>(fields: impl IntoIterator<Item = (K, SchemaNode)>) -> Self
    where
        K: Into<String>,
    {
        Self::Map(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Expect a sequence whose every element conforms to `element`.
    pub fn seq(element: SchemaNode) -> Self {
        Self::Seq(Some(Box::new(element)))
    }

    /// Expect a sequence, elements unchecked.
    pub fn seq_any() -> Self {
        Self::Seq(None)
    }

    /// Whether this node tolerates an absent map key.
    ///
    /// Only the nullable wrapper does; every other node requires the key
    /// to be present.
    pub(crate) fn accepts_absent(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    /// Parse a schema from a JSON descriptor literal.
    ///
    /// The descriptor language mirrors how fixtures write schemas by
    /// hand:
    ///
    /// - `"string" | "integer" | "float" | "boolean" | "time" | "null"`
    ///   name scalar kinds;
    /// - `{"nullable": D}` wraps a descriptor in the nullable marker;
    /// - any other object declares an open map schema, one descriptor
    ///   per key;
    /// - `[]` declares a shape-only sequence, `[D]` a sequence of `D`.
    ///
    /// Anything else is a malformed descriptor — a programmer error
    /// reported with the JSON path of the offending node.
    pub fn from_descriptor(descriptor: &Value) -> Result<Self, SchemaError> {
        Self::parse_descriptor(descriptor, &mut Vec::new())
    }

    fn parse_descriptor(descriptor: &Value, path: &mut Vec<String>) -> Result<Self, SchemaError> {
        match descriptor {
            Value::String(kind) => match kind.as_str() {
                "string" => Ok(Self::string()),
                "integer" => Ok(Self::integer()),
                "float" => Ok(Self::float()),
                "boolean" => Ok(Self::boolean()),
                "time" => Ok(Self::time()),
                "null" => Ok(Self::null()),
                other => Err(SchemaError::malformed(
                    path,
                    format!("unknown scalar kind {other:?}"),
                )),
            },
            Value::Object(fields) => {
                // A single-key {"nullable": D} object is the nullable
                // wrapper, not a one-field map schema.
                if fields.len() == 1 {
                    if let Some(inner) = fields.get("nullable") {
                        path.push("nullable".to_string());
                        let parsed = Self::parse_descriptor(inner, path)?;
                        path.pop();
                        return Ok(Self::nullable(parsed));
                    }
                }
                let mut parsed = Vec::with_capacity(fields.len());
                for (key, sub) in fields {
                    path.push(key.clone());
                    parsed.push((key.clone(), Self::parse_descriptor(sub, path)?));
                    path.pop();
                }
                Ok(Self::Map(parsed))
            }
            Value::Array(elements) => match elements.len() {
                0 => Ok(Self::seq_any()),
                1 => {
                    path.push("0".to_string());
                    let parsed = Self::parse_descriptor(&elements[0], path)?;
                    path.pop();
                    Ok(Self::seq(parsed))
                }
                n => Err(SchemaError::malformed(
                    path,
                    format!("sequence descriptor must have 0 or 1 elements, got {n}"),
                )),
            },
            other => Err(SchemaError::malformed(
                path,
                format!("unrecognized descriptor node: {other}"),
            )),
        }
    }
}

/// Errors from schema construction. Validation itself never fails — only
/// parsing a malformed descriptor does, and no correct caller recovers
/// from it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The descriptor node is not part of the schema language.
    #[error("malformed schema descriptor at {path}: {reason}")]
    Malformed {
        /// Dotted path of the offending descriptor node (`$` for root).
        path: String,
        /// Description of what was found.
        reason: String,
    },
}

impl SchemaError {
    fn malformed(path: &[String], reason: String) -> Self {
        let path = if path.is_empty() {
            "$".to_string()
        } else {
            path.join(".")
        };
        Self::Malformed { path, reason }
    }
}
