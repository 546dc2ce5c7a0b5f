//! # vox-compute — VoxCLOUD API Client
//!
//! Typed async HTTP client for the VoxCLOUD bare-metal compute API.
//! Covers the four operations the conformance suite exercises: device
//! provisioning (`voxcloud_create`), teardown (`voxcloud_delete`),
//! status polling (`voxcloud_status`), and device listing
//! (`devices_list`).
//!
//! ## Error Handling
//!
//! HTTP and provider failures are mapped to [`ComputeApiError`] with
//! diagnostic context (endpoint, HTTP status, response body excerpt).
//! Provider-reported failures — a `"stat": "fail"` body — surface as the
//! same [`ComputeErrorKind::Api`] kind as non-2xx statuses, so callers
//! checking error paths compare by kind only.
//!
//! ## Timeout & Retry
//!
//! Each request carries a per-request timeout (configurable, default
//! 30s). Transient transport failures are retried with exponential
//! backoff by the [`retry`] module; non-retryable failures (4xx,
//! deserialization) are returned immediately.

pub mod client;
pub mod config;
pub mod error;
pub mod retry;
pub mod wait;

pub use client::{ApiResponse, ComputeClient, CreateDeviceRequest};
pub use config::{ComputeConfig, ConfigError};
pub use error::{ComputeApiError, ComputeErrorKind};
pub use wait::{wait_for, wait_for_ready, WaitError};
