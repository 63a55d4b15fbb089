//! Shared application state for the wsDuet gateway.
//!
//! Holds the validated config, the metrics registry and the connection id
//! sequence. Nothing here is per-connection: each connection owns its own
//! serializer, and no resource is shared across connections.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::obs::metrics::GatewayMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    metrics: Arc<GatewayMetrics>,
    conn_seq: AtomicU64,
}

impl AppState {
    pub fn new(cfg: GatewayConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                metrics: Arc::new(GatewayMetrics::default()),
                conn_seq: AtomicU64::new(1),
            }),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    /// Monotonic id used to tag each connection's tracing span.
    pub fn next_conn_id(&self) -> u64 {
        self.inner.conn_seq.fetch_add(1, Ordering::Relaxed)
    }
}
