//! # vox-shape — Response Shape Conformance
//!
//! This crate provides the structural conformance checker at the heart of
//! the VoxCLOUD conformance kit: a recursive matcher that compares a
//! decoded JSON value tree against a declarative schema of expected leaf
//! kinds and nested shapes.
//!
//! ## Responsibilities
//!
//! - **Schema description:** [`SchemaNode`] is a closed set of variants —
//!   scalar leaf kinds, a nullable wrapper, open map schemas, and
//!   sequence schemas (optionally shape-only). Schemas are built with the
//!   constructor DSL or parsed from a JSON descriptor literal.
//!
//! - **Matching:** [`validate`] walks schema and value together,
//!   depth-first in schema declaration order, and reports either
//!   [`MatchResult::Conforms`] or the first [`ShapeMismatch`] with the
//!   full dotted/indexed path from the root (`devices[0].label`) and a
//!   structured reason.
//!
//! ## Design
//!
//! Map schemas are **open**: declared keys must be present and conform,
//! undeclared keys are ignored. Provider responses grow fields over time;
//! rejecting unknown keys would break every consumer on every provider
//! release.
//!
//! Mismatches are returned as data, never as `Err` — a malformed *actual*
//! value is exactly what the matcher exists to report, so callers can
//! aggregate failures across a run. Only parsing a malformed *schema*
//! descriptor fails, with [`SchemaError`], and that is a programmer
//! error caught at construction time.
//!
//! The matcher is a pure function of `(&SchemaNode, &Value)`: it owns
//! neither input, mutates nothing, and holds no state across calls, so
//! it may be invoked freely from concurrent tests.

pub mod matcher;
pub mod schema;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use matcher::{validate, MatchResult, MismatchReason, Path, Segment, ShapeMismatch};
pub use schema::{ScalarKind, SchemaError, SchemaNode};
pub use value::{kind_of, ValueKind};
