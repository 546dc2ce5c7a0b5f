//! The recursive conformance matcher.
//!
//! [`validate`] walks a [`SchemaNode`] and a decoded JSON value together,
//! depth-first, keys and elements in schema declaration order, and stops
//! at the first violation. The mismatch carries the full path from the
//! root so a failure inside a nested device record reads
//! `devices[0].drives.position` rather than "somewhere in the body".

use serde_json::Value;

use crate::schema::{ScalarKind, SchemaNode};
use crate::value::{is_timestamp, kind_of, ValueKind};

/// One step from the root toward the mismatching node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Descent through a map key.
    Key(String),
    /// Descent through a sequence index.
    Index(usize),
}

/// The path from the root of the actual value to a mismatching node.
///
/// Renders in dotted/indexed form: `devices[0].label`. The empty path —
/// a mismatch at the root itself — renders as `$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(Vec<Segment>);

impl Path {
    /// The path segments, root first.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Whether the mismatch occurred at the root value itself.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{key}")?;
                }
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Why a value failed to conform at a given path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchReason {
    /// A key declared by a map schema is absent from the actual map.
    MissingKey,
    /// The value's runtime kind does not satisfy the expected leaf kind.
    TypeMismatch {
        /// The leaf kind the schema declared.
        expected: ScalarKind,
        /// The kind actually observed.
        actual: ValueKind,
    },
    /// A map schema met a non-map value.
    NotAMap {
        /// The kind actually observed.
        actual: ValueKind,
    },
    /// A sequence schema met a non-sequence value.
    NotASequence {
        /// The kind actually observed.
        actual: ValueKind,
    },
}

impl std::fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingKey => write!(f, "missing key"),
            Self::TypeMismatch { expected, actual } => {
                write!(f, "expected {expected}, got {actual}")
            }
            Self::NotAMap { actual } => write!(f, "expected Map, got {actual}"),
            Self::NotASequence { actual } => write!(f, "expected Sequence, got {actual}"),
        }
    }
}

/// A conformance failure: where, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMismatch {
    /// Path from the root of the actual value to the failing node.
    pub path: Path,
    /// The structured failure reason.
    pub reason: MismatchReason,
}

impl std::fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.reason, self.path)
    }
}

/// Verdict of a conformance check.
///
/// `Conforms` guarantees every declared key and element satisfied its
/// schema, recursively; it says nothing about undeclared keys (open
/// schema). Mismatches are data, not errors — callers aggregate them
/// into their own reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// The value satisfies the schema.
    Conforms,
    /// The first violation found, with path and reason.
    Mismatch(ShapeMismatch),
}

impl MatchResult {
    /// Whether the value conformed.
    pub fn is_conforms(&self) -> bool {
        matches!(self, Self::Conforms)
    }

    /// The mismatch, if any.
    pub fn mismatch(&self) -> Option<&ShapeMismatch> {
        match self {
            Self::Conforms => None,
            Self::Mismatch(m) => Some(m),
        }
    }
}

/// Check a decoded JSON value against a shape schema.
///
/// Pure function: borrows both inputs, mutates neither, holds no state.
/// Descent is depth-first in schema declaration order, so for fixed
/// inputs the reported mismatch (and its path) is deterministic.
pub fn validate(schema: &SchemaNode, actual: &Value) -> MatchResult {
    let mut path = Vec::new();
    match walk(schema, actual, &mut path) {
        None => MatchResult::Conforms,
        Some(mismatch) => MatchResult::Mismatch(mismatch),
    }
}

fn walk(schema: &SchemaNode, actual: &Value, path: &mut Vec<Segment>) -> Option<ShapeMismatch> {
    match schema {
        SchemaNode::Scalar(kind) => {
            if scalar_conforms(*kind, actual) {
                None
            } else {
                Some(mismatch_at(
                    path,
                    MismatchReason::TypeMismatch {
                        expected: *kind,
                        actual: kind_of(actual),
                    },
                ))
            }
        }
        SchemaNode::Nullable(inner) => {
            if actual.is_null() {
                None
            } else {
                walk(inner, actual, path)
            }
        }
        SchemaNode::Map(fields) => {
            let Some(map) = actual.as_object() else {
                return Some(mismatch_at(
                    path,
                    MismatchReason::NotAMap {
                        actual: kind_of(actual),
                    },
                ));
            };
            for (key, subschema) in fields {
                match map.get(key) {
                    Some(value) => {
                        path.push(Segment::Key(key.clone()));
                        if let Some(mismatch) = walk(subschema, value, path) {
                            return Some(mismatch);
                        }
                        path.pop();
                    }
                    // Nullable tolerates an absent key, nothing else does.
                    None if subschema.accepts_absent() => {}
                    None => {
                        path.push(Segment::Key(key.clone()));
                        let mismatch = mismatch_at(path, MismatchReason::MissingKey);
                        return Some(mismatch);
                    }
                }
            }
            None
        }
        SchemaNode::Seq(element) => {
            let Some(items) = actual.as_array() else {
                return Some(mismatch_at(
                    path,
                    MismatchReason::NotASequence {
                        actual: kind_of(actual),
                    },
                ));
            };
            let Some(element) = element else {
                // Shape-only assertion: "is a sequence".
                return None;
            };
            for (index, item) in items.iter().enumerate() {
                path.push(Segment::Index(index));
                if let Some(mismatch) = walk(element, item, path) {
                    return Some(mismatch);
                }
                path.pop();
            }
            None
        }
    }
}

fn scalar_conforms(kind: ScalarKind, actual: &Value) -> bool {
    match kind {
        ScalarKind::String => actual.is_string(),
        ScalarKind::Integer => matches!(actual, Value::Number(n) if n.is_i64() || n.is_u64()),
        ScalarKind::Float => actual.is_number(),
        ScalarKind::Boolean => actual.is_boolean(),
        ScalarKind::Time => actual.as_str().is_some_and(is_timestamp),
        ScalarKind::Null => actual.is_null(),
    }
}

fn mismatch_at(path: &[Segment], reason: MismatchReason) -> ShapeMismatch {
    ShapeMismatch {
        path: Path(path.to_vec()),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaNode;
    use serde_json::json;

    fn mismatch(result: MatchResult) -> ShapeMismatch {
        match result {
            MatchResult::Mismatch(m) => m,
            MatchResult::Conforms => panic!("expected a mismatch"),
        }
    }

    // -- scalars ----------------------------------------------------------------

    #[test]
    fn scalar_kinds_match_their_values() {
        assert!(validate(&SchemaNode::string(), &json!("x")).is_conforms());
        assert!(validate(&SchemaNode::integer(), &json!(7)).is_conforms());
        assert!(validate(&SchemaNode::boolean(), &json!(false)).is_conforms());
        assert!(validate(&SchemaNode::null(), &json!(null)).is_conforms());
        assert!(validate(&SchemaNode::time(), &json!("2026-08-27T10:00:00Z")).is_conforms());
    }

    #[test]
    fn integer_rejects_fractional_number() {
        let m = mismatch(validate(&SchemaNode::integer(), &json!(1.5)));
        assert_eq!(
            m.reason,
            MismatchReason::TypeMismatch {
                expected: ScalarKind::Integer,
                actual: ValueKind::Float,
            }
        );
    }

    #[test]
    fn float_accepts_integral_number() {
        // Providers serialize 1.0 as 1; a Float position tolerates it.
        assert!(validate(&SchemaNode::float(), &json!(1)).is_conforms());
        assert!(validate(&SchemaNode::float(), &json!(1.25)).is_conforms());
    }

    #[test]
    fn time_rejects_non_timestamp_string() {
        let m = mismatch(validate(&SchemaNode::time(), &json!("not a time")));
        assert_eq!(
            m.reason,
            MismatchReason::TypeMismatch {
                expected: ScalarKind::Time,
                actual: ValueKind::String,
            }
        );
    }

    #[test]
    fn root_type_mismatch_has_root_path() {
        let m = mismatch(validate(&SchemaNode::string(), &json!(3)));
        assert!(m.path.is_root());
        assert_eq!(format!("{m}"), "expected String, got Integer at $");
    }

    // -- nullable ---------------------------------------------------------------

    #[test]
    fn nullable_accepts_null() {
        let schema = SchemaNode::nullable(SchemaNode::integer());
        assert!(validate(&schema, &json!(null)).is_conforms());
    }

    #[test]
    fn nullable_accepts_conforming_inner() {
        let schema = SchemaNode::nullable(SchemaNode::integer());
        assert!(validate(&schema, &json!(4)).is_conforms());
    }

    #[test]
    fn nullable_rejects_wrong_inner_type() {
        let schema = SchemaNode::nullable(SchemaNode::integer());
        let m = mismatch(validate(&schema, &json!("x")));
        assert_eq!(
            m.reason,
            MismatchReason::TypeMismatch {
                expected: ScalarKind::Integer,
                actual: ValueKind::String,
            }
        );
    }

    #[test]
    fn nullable_map_field_tolerates_absent_key() {
        let schema = SchemaNode::map([("position", SchemaNode::nullable(SchemaNode::integer()))]);
        assert!(validate(&schema, &json!({})).is_conforms());
    }

    // -- maps -------------------------------------------------------------------

    #[test]
    fn extra_keys_are_tolerated() {
        let schema = SchemaNode::map([("a", SchemaNode::string())]);
        assert!(validate(&schema, &json!({"a": "x", "b": 1})).is_conforms());
    }

    #[test]
    fn missing_key_is_rejected_with_key_path() {
        let schema = SchemaNode::map([("a", SchemaNode::string())]);
        let m = mismatch(validate(&schema, &json!({"b": 1})));
        assert_eq!(m.reason, MismatchReason::MissingKey);
        assert_eq!(format!("{}", m.path), "a");
        assert_eq!(format!("{m}"), "missing key at a");
    }

    #[test]
    fn non_map_value_fails_map_schema() {
        let schema = SchemaNode::map([("a", SchemaNode::string())]);
        let m = mismatch(validate(&schema, &json!([1, 2])));
        assert_eq!(
            m.reason,
            MismatchReason::NotAMap {
                actual: ValueKind::Sequence,
            }
        );
    }

    #[test]
    fn first_failing_key_in_declaration_order_wins() {
        let schema = SchemaNode::map([
            ("first", SchemaNode::string()),
            ("second", SchemaNode::string()),
        ]);
        let m = mismatch(validate(&schema, &json!({"first": 1, "second": 2})));
        assert_eq!(format!("{}", m.path), "first");
    }

    // -- sequences --------------------------------------------------------------

    #[test]
    fn sequence_element_mismatch_carries_index() {
        let schema = SchemaNode::seq(SchemaNode::string());
        let m = mismatch(validate(&schema, &json!(["a", 2, "c"])));
        assert_eq!(format!("{}", m.path), "[1]");
        assert_eq!(
            m.reason,
            MismatchReason::TypeMismatch {
                expected: ScalarKind::String,
                actual: ValueKind::Integer,
            }
        );
    }

    #[test]
    fn shape_only_sequence_ignores_elements() {
        let schema = SchemaNode::seq_any();
        assert!(validate(&schema, &json!([1, "a", {}])).is_conforms());
        assert!(validate(&schema, &json!([])).is_conforms());
    }

    #[test]
    fn non_sequence_value_fails_sequence_schema() {
        let schema = SchemaNode::seq_any();
        let m = mismatch(validate(&schema, &json!({"not": "a list"})));
        assert_eq!(
            m.reason,
            MismatchReason::NotASequence {
                actual: ValueKind::Map,
            }
        );
    }

    #[test]
    fn empty_sequence_conforms_to_typed_element_schema() {
        let schema = SchemaNode::seq(SchemaNode::integer());
        assert!(validate(&schema, &json!([])).is_conforms());
    }

    // -- nesting ----------------------------------------------------------------

    #[test]
    fn nested_mismatch_renders_full_path() {
        let schema = SchemaNode::map([(
            "devices",
            SchemaNode::seq(SchemaNode::map([("label", SchemaNode::string())])),
        )]);
        let actual = json!({
            "devices": [
                {"label": "ok"},
                {"label": 99},
            ]
        });
        let m = mismatch(validate(&schema, &actual));
        assert_eq!(format!("{}", m.path), "devices[1].label");
        assert_eq!(format!("{m}"), "expected String, got Integer at devices[1].label");
    }

    #[test]
    fn deeply_nested_conformance() {
        let schema = SchemaNode::map([(
            "location",
            SchemaNode::map([(
                "facility",
                SchemaNode::map([
                    ("code", SchemaNode::string()),
                    ("id", SchemaNode::string()),
                ]),
            )]),
        )]);
        let actual = json!({
            "location": {
                "facility": {"code": "LDJ1", "id": "4", "extra": true},
                "rack": {"id": "9"}
            }
        });
        assert!(validate(&schema, &actual).is_conforms());
    }

    #[test]
    fn validate_is_idempotent() {
        let schema = SchemaNode::map([("a", SchemaNode::seq(SchemaNode::integer()))]);
        let actual = json!({"a": [1, "x"]});
        let first = validate(&schema, &actual);
        let second = validate(&schema, &actual);
        assert_eq!(first, second);
    }

    // -- path rendering ---------------------------------------------------------

    #[test]
    fn path_display_forms() {
        assert_eq!(format!("{}", Path::default()), "$");
        let p = Path(vec![
            Segment::Key("devices".into()),
            Segment::Index(0),
            Segment::Key("label".into()),
        ]);
        assert_eq!(format!("{p}"), "devices[0].label");
        let p = Path(vec![Segment::Index(1)]);
        assert_eq!(format!("{p}"), "[1]");
    }
}

#[cfg(test)]
mod properties {
    use super::*;
    use crate::schema::SchemaNode;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    /// Arbitrary JSON value trees, bounded depth.
    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            any::<f64>().prop_filter("finite", |f| f.is_finite()).prop_map(Value::from),
            "[a-z]{0,8}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        /// Pure function: repeated calls on unchanged inputs agree.
        #[test]
        fn validation_is_deterministic(value in arb_value()) {
            let schema = SchemaNode::map([
                ("id", SchemaNode::string()),
                ("count", SchemaNode::nullable(SchemaNode::integer())),
                ("tags", SchemaNode::seq_any()),
            ]);
            let first = validate(&schema, &value);
            let second = validate(&schema, &value);
            prop_assert_eq!(first, second);
        }

        /// The matcher never mutates the actual value.
        #[test]
        fn validation_leaves_actual_untouched(value in arb_value()) {
            let schema = SchemaNode::seq(SchemaNode::map([("x", SchemaNode::integer())]));
            let before = value.clone();
            let _ = validate(&schema, &value);
            prop_assert_eq!(before, value);
        }

        /// Any generated map conforms to the open empty-map schema, and
        /// any generated array conforms to the shape-only sequence schema.
        #[test]
        fn open_schemas_accept_matching_containers(value in arb_value()) {
            let map_schema = SchemaNode::map(Vec::<(String, SchemaNode)>::new());
            let seq_schema = SchemaNode::seq_any();
            prop_assert_eq!(
                validate(&map_schema, &value).is_conforms(),
                value.is_object()
            );
            prop_assert_eq!(
                validate(&seq_schema, &value).is_conforms(),
                value.is_array()
            );
        }

        /// Wrapping any schema in Nullable only widens acceptance.
        #[test]
        fn nullable_widens_acceptance(value in arb_value()) {
            let inner = SchemaNode::map([("id", SchemaNode::string())]);
            let wrapped = SchemaNode::nullable(inner.clone());
            if validate(&inner, &value).is_conforms() {
                prop_assert!(validate(&wrapped, &value).is_conforms());
            }
            prop_assert!(validate(&wrapped, &Value::Null).is_conforms());
        }
    }

    #[test]
    fn conforming_fixture_passes_every_declared_leaf() {
        // Spot-check of the §conformance guarantee on a realistic body.
        let schema = SchemaNode::map([
            ("device", SchemaNode::map([
                ("id", SchemaNode::string()),
                ("last_update", SchemaNode::time()),
            ])),
            ("stat", SchemaNode::string()),
        ]);
        let body = json!({
            "device": {"id": "1", "last_update": "2026-08-27 10:00:00"},
            "stat": "ok",
            "undeclared": [1, 2, 3]
        });
        assert!(validate(&schema, &body).is_conforms());
    }
}
