//! Periodic producers attached to every connection.
//!
//! Each producer submits one message, then sleeps for its interval. It stops
//! when the connection's shutdown signal fires (checked before every
//! submission and raced against the sleep) or when its own submission fails,
//! in which case it closes the connection first.

use std::sync::Arc;
use std::time::Duration;

use wsduet_core::protocol::outbound::Outbound;

use crate::serializer::Serializer;

/// Interval of the periodic text emitters.
pub const TEXT_INTERVAL: Duration = Duration::from_millis(250);
/// Interval of the liveness probe.
pub const PROBE_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub enum EmitterKind {
    /// Fixed text payload.
    Text(String),
    /// Empty ping through the serializer's probe path.
    Probe,
}

/// One periodic producer.
#[derive(Debug, Clone)]
pub struct Emitter {
    pub kind: EmitterKind,
    pub every: Duration,
}

impl Emitter {
    pub fn text(payload: impl Into<String>, every: Duration) -> Self {
        Self {
            kind: EmitterKind::Text(payload.into()),
            every,
        }
    }

    pub fn probe(every: Duration) -> Self {
        Self {
            kind: EmitterKind::Probe,
            every,
        }
    }

    /// "blue", "red" and the liveness probe at their stock intervals.
    pub fn defaults() -> Vec<Emitter> {
        vec![
            Emitter::text("blue", TEXT_INTERVAL),
            Emitter::text("red", TEXT_INTERVAL),
            Emitter::probe(PROBE_INTERVAL),
        ]
    }

    pub fn label(&self) -> &str {
        match &self.kind {
            EmitterKind::Text(p) => p,
            EmitterKind::Probe => "probe",
        }
    }
}

/// Run `emitter` against `conn` until shutdown or a failed submission.
pub async fn run<S: Serializer + ?Sized>(conn: Arc<S>, emitter: Emitter) {
    let shutdown = conn.shutdown().clone();
    let mut sent: u64 = 0;

    loop {
        if shutdown.is_triggered() {
            break;
        }

        let res = match &emitter.kind {
            EmitterKind::Text(payload) => conn.submit(Outbound::text(payload.clone())).await,
            EmitterKind::Probe => conn.probe().await,
        };
        if let Err(e) = res {
            tracing::warn!(producer = emitter.label(), error = %e, "submission failed; closing connection");
            conn.close().await;
            break;
        }
        sent += 1;

        tokio::select! {
            _ = tokio::time::sleep(emitter.every) => {}
            _ = shutdown.triggered() => break,
        }
    }

    tracing::debug!(producer = emitter.label(), sent, "producer stopped");
}
