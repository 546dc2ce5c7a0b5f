// SPDX-License-Identifier: BUSL-1.1
//! In-memory storage backend using DashMap.
//!
//! Device records are stored as raw `serde_json::Value` trees in exactly
//! the shape the list endpoint serves, keyed by the decimal device id.
//! Ids are assigned from a monotonically increasing counter so create
//! responses are deterministic within a run.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

/// Inner storage holding the device map and the id counter.
struct Inner {
    devices: DashMap<String, Value>,
    next_id: AtomicU64,
}

/// Shared application state.
///
/// Cheaply cloneable via `Arc` — all clones share the same data.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                devices: DashMap::new(),
                // Provider ids are small decimals in practice; start high
                // enough that fixtures never collide with hand-written ids.
                next_id: AtomicU64::new(991),
            }),
        }
    }

    /// Allocate the next device id.
    pub fn allocate_id(&self) -> String {
        self.inner.next_id.fetch_add(1, Ordering::SeqCst).to_string()
    }

    pub fn devices(&self) -> &DashMap<String, Value> {
        &self.inner.devices
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
