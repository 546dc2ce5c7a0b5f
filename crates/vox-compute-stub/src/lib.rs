// SPDX-License-Identifier: BUSL-1.1
//! In-memory VoxCLOUD API stub.
//!
//! Implements the endpoints that `vox-compute` calls, with responses in
//! the provider's documented shapes, so the conformance suite can run
//! end-to-end without live provider access. Storage is in-memory
//! (DashMap) with no persistence — data is lost on restart.
//!
//! Provisioning is emulated: devices are created in status `QUEUED` and
//! flip to `SUCCEEDED` on the poll after their first status query, so
//! ready-waiting callers exercise at least one real polling cycle.

pub mod routes;
pub mod store;

pub use routes::router;
pub use store::AppState;
