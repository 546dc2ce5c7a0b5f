//! # vox-conformance — Provider Conformance Suite
//!
//! Drives the VoxCLOUD API through its provisioning lifecycle and checks
//! that responses conform to the documented shapes. Three pieces:
//!
//! - [`runner`]: named test cases with pass/fail/pending accounting,
//!   verdicts logged as they are recorded;
//! - [`assert`]: the assertion adapters — [`assert::formats`] runs the
//!   shape matcher over a response body, [`assert::succeeds`] and
//!   [`assert::expect_raises`] check operation outcomes (the latter by
//!   error *kind* only);
//! - [`fixtures`]: the shape schemas for the provider's documented
//!   response bodies, built once per run and shared by reference.
//!
//! The suite itself performs no I/O; callers hand in operation results
//! and response bodies obtained from [`vox_compute::ComputeClient`].

pub mod assert;
pub mod fixtures;
pub mod runner;

pub use assert::{expect_raises, formats, succeeds};
pub use fixtures::{devices_format, server_format};
pub use runner::{CaseRecord, RunReport, Suite, Verdict};
