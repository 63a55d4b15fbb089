//! Axum router wiring.
//!
//! - `/`         : landing page
//! - `/channels` : WebSocket, actor serializer
//! - `/mutexes`  : WebSocket, mutex serializer
//! - `/healthz`, `/metrics` : ops

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, serializer::Strategy, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ops::index))
        .route(Strategy::Actor.route(), get(transport::ws::channels_upgrade))
        .route(Strategy::Mutex.route(), get(transport::ws::mutexes_upgrade))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
