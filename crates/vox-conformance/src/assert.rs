//! Assertion adapters.
//!
//! Thin translations from operation outcomes to [`Verdict`]s. The shape
//! check is the interesting one; `succeeds` and `expect_raises` are
//! pass-throughs whose contracts matter more than their code —
//! `expect_raises` in particular compares by error *kind* only, never by
//! message or payload.

use serde_json::Value;

use vox_compute::{ComputeApiError, ComputeErrorKind};
use vox_shape::{validate, MatchResult, SchemaNode};

use crate::runner::Verdict;

/// Assert that a response body conforms to a shape schema.
///
/// A mismatch fails the case with the rendered path and reason
/// (`expected String, got Integer at devices[0].label`).
pub fn formats(schema: &SchemaNode, body: &Value) -> Verdict {
    match validate(schema, body) {
        MatchResult::Conforms => Verdict::Passed,
        MatchResult::Mismatch(mismatch) => Verdict::failed(mismatch),
    }
}

/// Assert that an operation returned normally.
pub fn succeeds<T>(result: Result<T, ComputeApiError>) -> Verdict {
    match result {
        Ok(_) => Verdict::Passed,
        Err(e) => Verdict::failed(format!("operation failed: {e}")),
    }
}

/// Assert that an operation failed with the given error kind.
///
/// Returning normally fails the case, and so does failing with any
/// other kind — a transport error is not a provider rejection.
pub fn expect_raises<T>(result: Result<T, ComputeApiError>, expected: ComputeErrorKind) -> Verdict {
    match result {
        Ok(_) => Verdict::failed(format!("expected {expected} error, operation succeeded")),
        Err(e) if e.kind() == expected => Verdict::Passed,
        Err(e) => Verdict::failed(format!("expected {expected} error, got {}: {e}", e.kind())),
    }
}
