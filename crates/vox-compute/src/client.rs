//! The VoxCLOUD API client.
//!
//! Wraps a `reqwest::Client` with bearer authentication, a per-request
//! timeout, and the provider's operation endpoints. Every operation
//! returns an [`ApiResponse`] — the raw decoded body plus HTTP status —
//! rather than typed response structs: the conformance layer's whole job
//! is to check the body's shape, so the client must not pre-filter it
//! through serde structs.

use serde_json::Value;
use std::time::Duration;

use vox_core::{DeviceId, FacilityCode};

use crate::config::ComputeConfig;
use crate::error::ComputeApiError;
use crate::retry::retry_send;

/// A decoded provider response: HTTP status plus the raw JSON body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code of the response.
    pub status: u16,
    /// The decoded JSON body, unfiltered.
    pub body: Value,
}

/// Parameters for `voxcloud_create`.
#[derive(Debug, Clone)]
pub struct CreateDeviceRequest {
    /// Hostname to assign to the new device.
    pub hostname: String,
    /// Disk size in GB.
    pub disk_size: u32,
    /// Number of processing cores.
    pub processing_cores: u32,
    /// Provider image identifier.
    pub image_id: u32,
    /// Facility to provision in.
    pub facility: FacilityCode,
}

/// Async HTTP client for the VoxCLOUD compute API.
///
/// `Send + Sync`; share it behind an `Arc` across tasks. All operations
/// retry transient transport failures via [`crate::retry`] before
/// surfacing [`ComputeApiError::Http`].
#[derive(Debug)]
pub struct ComputeClient {
    client: reqwest::Client,
    base_url: String,
}

impl ComputeClient {
    /// Build a client from configuration.
    pub fn new(config: ComputeConfig) -> Result<Self, ComputeApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                        .map_err(|_| {
                            ComputeApiError::Config(crate::config::ConfigError::InvalidApiKey {
                                reason: "not a valid header value".to_string(),
                            })
                        })?,
                );
                headers.insert(
                    reqwest::header::CONTENT_TYPE,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()
            .map_err(|e| ComputeApiError::Http {
                endpoint: "client_build".to_string(),
                source: e,
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Build a client from `VOX_COMPUTE_URL` / `VOX_COMPUTE_KEY`.
    pub fn from_env() -> Result<Self, ComputeApiError> {
        Self::new(ComputeConfig::from_env()?)
    }

    /// Provision a new device.
    ///
    /// `POST /v1/voxcloud/create`. On success the body carries the new
    /// device's id and last-update timestamp under `device`, plus the
    /// provider's `stat` marker.
    pub async fn voxcloud_create(
        &self,
        request: &CreateDeviceRequest,
    ) -> Result<ApiResponse, ComputeApiError> {
        let url = format!("{}/v1/voxcloud/create", self.base_url);
        let body = serde_json::json!({
            "hostname": request.hostname,
            "disk_size": request.disk_size,
            "processing_cores": request.processing_cores,
            "image_id": request.image_id,
            "facility": request.facility.as_str(),
        });
        self.send("voxcloud_create", reqwest::Method::POST, url, Some(body))
            .await
    }

    /// Tear down a device.
    ///
    /// `POST /v1/voxcloud/delete`. An unknown device id is a provider
    /// rejection ([`crate::ComputeErrorKind::Api`]).
    pub async fn voxcloud_delete(&self, id: &DeviceId) -> Result<ApiResponse, ComputeApiError> {
        let url = format!("{}/v1/voxcloud/delete", self.base_url);
        let body = serde_json::json!({ "device_id": id.as_str() });
        self.send("voxcloud_delete", reqwest::Method::POST, url, Some(body))
            .await
    }

    /// Query provisioning status for a device.
    ///
    /// `GET /v1/voxcloud/status/:id`.
    pub async fn voxcloud_status(&self, id: &DeviceId) -> Result<ApiResponse, ComputeApiError> {
        let url = format!("{}/v1/voxcloud/status/{}", self.base_url, id);
        self.send("voxcloud_status", reqwest::Method::GET, url, None)
            .await
    }

    /// List devices — all of them, or a single device by id.
    ///
    /// `GET /v1/devices/list` or `GET /v1/devices/list/:id`.
    pub async fn devices_list(
        &self,
        id: Option<&DeviceId>,
    ) -> Result<ApiResponse, ComputeApiError> {
        let url = match id {
            Some(id) => format!("{}/v1/devices/list/{}", self.base_url, id),
            None => format!("{}/v1/devices/list", self.base_url),
        };
        self.send("devices_list", reqwest::Method::GET, url, None)
            .await
    }

    /// Send a request and map the outcome consistently.
    ///
    /// Three failure routes: transport errors (after retry) become
    /// `Http`; non-2xx statuses and `"stat": "fail"` bodies become
    /// `Api`; undecodable 2xx bodies become `Deserialization`.
    async fn send(
        &self,
        endpoint: &str,
        method: reqwest::Method,
        url: String,
        body: Option<Value>,
    ) -> Result<ApiResponse, ComputeApiError> {
        tracing::debug!(endpoint, %url, "sending VoxCLOUD request");

        let resp = retry_send(|| {
            let request = self.client.request(method.clone(), &url);
            let request = match &body {
                Some(json) => request.json(json),
                None => request,
            };
            request.send()
        })
        .await
        .map_err(|e| ComputeApiError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ComputeApiError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let decoded: Value = resp
            .json()
            .await
            .map_err(|e| ComputeApiError::Deserialization {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        // The provider reports some failures in-band with a 2xx status.
        if decoded.get("stat").and_then(Value::as_str) == Some("fail") {
            let message = decoded
                .get("err")
                .and_then(Value::as_str)
                .unwrap_or("provider reported stat=fail")
                .to_string();
            return Err(ComputeApiError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: message,
            });
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            body: decoded,
        })
    }
}

/// Truncate a response body for error context.
fn excerpt(body: &str) -> String {
    const MAX: usize = 256;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}…", &body[..cut])
    }
}
