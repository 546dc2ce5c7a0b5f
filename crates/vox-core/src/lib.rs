//! # vox-core — Foundational Types
//!
//! Domain-primitive newtypes shared across the VoxCLOUD conformance kit.
//! Downstream crates (`vox-compute`, `vox-conformance`) depend on this
//! crate ONLY for identifier newtypes — no HTTP, no schema logic, no
//! test-runner machinery lives here.

pub mod error;
pub mod identity;

pub use error::ValidationError;
pub use identity::{DeviceId, FacilityCode};
