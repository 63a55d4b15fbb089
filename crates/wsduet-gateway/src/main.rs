//! wsDuet gateway binary.
//!
//! - `/channels` : actor-serialized WebSocket
//! - `/mutexes`  : mutex-serialized WebSocket
//! - Config from `wsduet.yaml` (override with `WSDUET_CONFIG`)

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use wsduet_core::error::{DuetError, Result};
use wsduet_gateway::{app_state, config, router};

const DEFAULT_CONFIG_PATH: &str = "wsduet.yaml";

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.code(), "wsduet-gateway stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::var("WSDUET_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .map_err(|e| DuetError::Config(format!("gateway.listen must be a valid SocketAddr: {e}")))?;

    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, "wsduet-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| DuetError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| DuetError::Internal(format!("server failed: {e}")))
}
