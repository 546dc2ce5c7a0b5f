//! Polling primitives for provisioning readiness.
//!
//! Provisioning is asynchronous on the provider side: `voxcloud_create`
//! returns while the device is still `QUEUED`. [`wait_for`] polls a
//! caller-supplied predicate at a fixed interval until it reports true
//! or the deadline passes; [`wait_for_ready`] is the concrete form the
//! conformance suite uses, polling `voxcloud_status` for `SUCCEEDED`.

use std::future::Future;
use std::time::{Duration, Instant};

use serde_json::Value;
use vox_core::DeviceId;

use crate::client::ComputeClient;
use crate::error::ComputeApiError;

/// The status string the provider reports once a device is usable.
pub const READY_STATUS: &str = "SUCCEEDED";

/// Errors from readiness polling.
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    /// The deadline passed before the predicate reported true.
    #[error("timed out after {waited_ms}ms waiting for readiness")]
    TimedOut {
        /// Total time waited, in milliseconds.
        waited_ms: u64,
    },

    /// A poll itself failed; polling stops immediately rather than
    /// masking the error until the deadline.
    #[error(transparent)]
    Operation(#[from] ComputeApiError),
}

/// Poll `predicate` every `interval` until it returns true or `timeout`
/// elapses.
///
/// The predicate runs at least once, immediately, so a short timeout
/// still observes an already-ready resource.
pub async fn wait_for<F, Fut>(
    mut predicate: F,
    interval: Duration,
    timeout: Duration,
) -> Result<(), WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, ComputeApiError>>,
{
    let started = Instant::now();
    loop {
        if predicate().await? {
            return Ok(());
        }
        if started.elapsed() >= timeout {
            return Err(WaitError::TimedOut {
                waited_ms: started.elapsed().as_millis() as u64,
            });
        }
        tokio::time::sleep(interval).await;
    }
}

/// Poll `voxcloud_status` until the device reports [`READY_STATUS`].
pub async fn wait_for_ready(
    client: &ComputeClient,
    id: &DeviceId,
    interval: Duration,
    timeout: Duration,
) -> Result<(), WaitError> {
    wait_for(
        move || async move {
            let resp = client.voxcloud_status(id).await?;
            Ok(device_status(&resp.body) == Some(READY_STATUS))
        },
        interval,
        timeout,
    )
    .await
}

/// Extract the device status string from a `voxcloud_status` body.
fn device_status(body: &Value) -> Option<&str> {
    body.get("device")?.get("status")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn device_status_reads_nested_field() {
        let body = json!({"device": {"id": "1", "status": "QUEUED"}, "stat": "ok"});
        assert_eq!(device_status(&body), Some("QUEUED"));
        assert_eq!(device_status(&json!({"stat": "ok"})), None);
    }

    #[tokio::test]
    async fn wait_for_returns_once_predicate_is_true() {
        let polls = Arc::new(AtomicU32::new(0));
        let p = polls.clone();
        let result = wait_for(
            || {
                let p = p.clone();
                async move { Ok(p.fetch_add(1, Ordering::SeqCst) >= 2) }
            },
            Duration::from_millis(1),
            Duration::from_secs(5),
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn wait_for_times_out() {
        let result = wait_for(
            || async { Ok(false) },
            Duration::from_millis(1),
            Duration::from_millis(10),
        )
        .await;
        assert!(matches!(result, Err(WaitError::TimedOut { .. })));
    }

    #[tokio::test]
    async fn wait_for_propagates_poll_errors() {
        let result = wait_for(
            || async {
                Err(ComputeApiError::Api {
                    endpoint: "voxcloud_status".to_string(),
                    status: 404,
                    body: "device not found".to_string(),
                })
            },
            Duration::from_millis(1),
            Duration::from_secs(5),
        )
        .await;
        assert!(matches!(result, Err(WaitError::Operation(_))));
    }

    #[tokio::test]
    async fn wait_for_polls_at_least_once_with_zero_timeout() {
        let result = wait_for(
            || async { Ok(true) },
            Duration::from_millis(1),
            Duration::ZERO,
        )
        .await;
        assert!(result.is_ok());
    }
}
