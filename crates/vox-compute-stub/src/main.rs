// SPDX-License-Identifier: BUSL-1.1
//! VoxCLOUD API stub server — standalone development server.
//!
//! In-memory implementation of the VoxCLOUD endpoints that `vox-compute`
//! calls. Run it locally to exercise the conformance suite without live
//! provider credentials.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use vox_compute_stub::{router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("VOX_STUB_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8090);

    let state = AppState::new();
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("vox-compute-stub listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
