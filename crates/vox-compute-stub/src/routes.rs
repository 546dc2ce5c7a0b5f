// SPDX-License-Identifier: BUSL-1.1
//! Route definitions for the VoxCLOUD stub.
//!
//! Implements the endpoints that `vox-compute` actually calls, with
//! bodies that satisfy the conformance suite's shape fixtures (full
//! device records, nullable drive positions, `stat` markers, in-band
//! `stat: fail` error bodies alongside the HTTP status).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::store::AppState;

/// Build the complete router with all VoxCLOUD stub routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health))
        // voxcloud provisioning lifecycle
        .route("/v1/voxcloud/create", post(voxcloud_create))
        .route("/v1/voxcloud/delete", post(voxcloud_delete))
        .route("/v1/voxcloud/status/:id", get(voxcloud_status))
        // device listing
        .route("/v1/devices/list", get(devices_list_all))
        .route("/v1/devices/list/:id", get(devices_list_one))
        // Fallback: 501 Not Implemented
        .fallback(not_implemented)
        .with_state(state)
}

/// Provider timestamp in the legacy space-separated form.
fn provider_now() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// The provider's in-band failure body, paired with the HTTP status.
fn stat_fail(status: StatusCode, err: &str) -> Response {
    (status, Json(json!({"stat": "fail", "err": err}))).into_response()
}

/// Build a full device record in the documented list shape.
fn device_record(id: &str, hostname: &str, facility: &str, disk_size: u64, cores: u64) -> Value {
    json!({
        "access_methods": [],
        "description": hostname,
        "drives": {
            // Position is unassigned until the device is racked.
            "position": null,
            "size": disk_size
        },
        "id": id,
        "ipassignments": [{
            "description": "Frontend IP",
            "id": format!("ip-{id}-1"),
            "type": "ipv4",
            "value": "10.11.12.13"
        }],
        "label": hostname,
        "location": {
            "cage":     {"id": "2",  "value": "Cage 2"},
            "facility": {"code": facility, "id": "7", "value": facility},
            "rack":     {"id": "14", "value": "Rack 14"},
            "row":      {"id": "3",  "value": "Row C"},
            "zone":     {"id": "1",  "value": "Zone 1"}
        },
        "memory": {"size": 4096},
        "model": {"id": "21", "value": "VoxCLOUD Instance"},
        "operating_system": {"architecture": 64, "name": "Ubuntu 24.04"},
        "power_consumption": "on",
        "processor": {"cores": cores},
        "status": "QUEUED",
        "type": {"id": "3", "value": "Virtual Server"}
    })
}

// ── Health ──────────────────────────────────────────────────────────

async fn health() -> StatusCode {
    StatusCode::OK
}

// ── Provisioning lifecycle ──────────────────────────────────────────

async fn voxcloud_create(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let hostname = body.get("hostname").and_then(Value::as_str).unwrap_or("");
    if hostname.is_empty() {
        return stat_fail(StatusCode::UNPROCESSABLE_ENTITY, "hostname is required");
    }
    let facility = body
        .get("facility")
        .and_then(Value::as_str)
        .unwrap_or("LDJ1");
    let disk_size = body.get("disk_size").and_then(Value::as_u64).unwrap_or(10);
    let cores = body
        .get("processing_cores")
        .and_then(Value::as_u64)
        .unwrap_or(1);

    let id = state.allocate_id();
    let record = device_record(&id, hostname, facility, disk_size, cores);
    state.devices().insert(id.clone(), record);
    tracing::info!(device_id = %id, hostname, "provisioned stub device");

    (
        StatusCode::CREATED,
        Json(json!({
            "device": {"id": id, "last_update": provider_now()},
            "stat": "ok"
        })),
    )
        .into_response()
}

async fn voxcloud_delete(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let Some(id) = body.get("device_id").and_then(Value::as_str) else {
        return stat_fail(StatusCode::UNPROCESSABLE_ENTITY, "device_id is required");
    };
    match state.devices().remove(id) {
        Some(_) => Json(json!({"stat": "ok"})).into_response(),
        None => stat_fail(StatusCode::NOT_FOUND, "device not found"),
    }
}

async fn voxcloud_status(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(mut entry) = state.devices().get_mut(&id) else {
        return stat_fail(StatusCode::NOT_FOUND, "device not found");
    };

    let current = entry
        .value()
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("QUEUED")
        .to_string();

    // Emulated provisioning: report the current status, then flip QUEUED
    // devices to SUCCEEDED so the next poll observes readiness.
    if current == "QUEUED" {
        if let Some(obj) = entry.value_mut().as_object_mut() {
            obj.insert("status".to_string(), json!("SUCCEEDED"));
        }
    }

    Json(json!({
        "device": {"id": id, "status": current},
        "stat": "ok"
    }))
    .into_response()
}

// ── Device listing ──────────────────────────────────────────────────

async fn devices_list_all(State(state): State<AppState>) -> Json<Value> {
    let devices: Vec<Value> = state
        .devices()
        .iter()
        .map(|e| e.value().clone())
        .collect();
    Json(json!({"devices": devices, "stat": "ok"}))
}

async fn devices_list_one(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.devices().get(&id) {
        Some(entry) => {
            Json(json!({"devices": [entry.value().clone()], "stat": "ok"})).into_response()
        }
        None => stat_fail(StatusCode::NOT_FOUND, "device not found"),
    }
}

// ── Fallback ────────────────────────────────────────────────────────

async fn not_implemented() -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}
