//! Transport decorator feeding the gateway metrics.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use wsduet_core::protocol::outbound::Outbound;
use wsduet_core::Result;

use super::Transport;
use crate::obs::metrics::GatewayMetrics;
use crate::serializer::Strategy;

/// Counts frames written per kind, failed writes, and write latency.
pub struct Metered<T> {
    inner: T,
    metrics: Arc<GatewayMetrics>,
    strategy: Strategy,
}

impl<T: Transport> Metered<T> {
    pub fn new(inner: T, metrics: Arc<GatewayMetrics>, strategy: Strategy) -> Self {
        Self {
            inner,
            metrics,
            strategy,
        }
    }
}

#[async_trait]
impl<T: Transport> Transport for Metered<T> {
    async fn write(&mut self, msg: Outbound) -> Result<()> {
        let kind = msg.kind();
        let strategy = self.strategy.as_str();
        let started = Instant::now();

        let res = self.inner.write(msg).await;

        self.metrics
            .write_duration
            .observe(&[("strategy", strategy)], started.elapsed());
        match &res {
            Ok(()) => self
                .metrics
                .frames_written
                .inc(&[("strategy", strategy), ("kind", kind.as_str())]),
            Err(_) => self.metrics.write_failures.inc(&[("strategy", strategy)]),
        }
        res
    }

    async fn close(&mut self) -> Result<()> {
        self.inner.close().await
    }
}
