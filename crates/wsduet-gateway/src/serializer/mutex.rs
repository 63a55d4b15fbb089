//! Mutex serializer: producers write directly under a shared lock.
//!
//! There is no writer task. Whichever producer holds the lock owns the
//! transport for the duration of one write. The same lock guards the
//! authoritative `closed` flag, so "check closed, then write" and "check
//! closed, then close" are atomic with respect to each other.
//!
//! The [`ShutdownSignal`] mirrors `closed` for tasks that only need a hint
//! (producer loops, the session driver). Reading it outside the lock is a
//! snapshot: a producer may still attempt one more write after it flips, and
//! that write becomes a no-op under the lock.

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard};

use wsduet_core::protocol::outbound::{Outbound, OutboundKind};
use wsduet_core::Result;

use super::{Serializer, ShutdownSignal, Strategy};
use crate::transport::Transport;

struct Guarded<T> {
    transport: T,
    closed: bool,
}

/// Lock-guarded connection handle, shared by all producers of one connection.
pub struct MutexConn<T: Transport> {
    inner: Mutex<Guarded<T>>,
    shutdown: ShutdownSignal,
}

impl<T: Transport> MutexConn<T> {
    pub fn new(transport: T) -> Self {
        Self {
            inner: Mutex::new(Guarded {
                transport,
                closed: false,
            }),
            shutdown: ShutdownSignal::new(),
        }
    }

    /// Write one message while holding the lock.
    ///
    /// After close this returns `Ok(())` without touching the transport. A
    /// failed write closes the connection before the lock is released, so no
    /// other producer can slip a write in between failure and close.
    pub async fn write(&self, kind: OutboundKind, payload: bytes::Bytes) -> Result<()> {
        let msg = Outbound::new(kind, payload)?;
        let mut guard = self.inner.lock().await;
        self.write_locked(&mut guard, msg).await
    }

    pub async fn write_text(&self, text: impl Into<String>) -> Result<()> {
        let mut guard = self.inner.lock().await;
        self.write_locked(&mut guard, Outbound::text(text)).await
    }

    /// Liveness probe: takes the connection lock itself rather than going
    /// through [`MutexConn::write`].
    pub async fn ping(&self) -> Result<()> {
        let mut guard = self.inner.lock().await;
        self.write_locked(&mut guard, Outbound::ping()).await
    }

    /// Close the transport once. Later calls observe `closed` and return.
    pub async fn close(&self) {
        let mut guard = self.inner.lock().await;
        if guard.closed {
            tracing::debug!(strategy = Strategy::Mutex.as_str(), "close on closed connection ignored");
            return;
        }
        self.close_locked(&mut guard).await;
    }

    /// Authoritative closed flag (takes the lock).
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.closed
    }

    async fn write_locked(&self, guard: &mut MutexGuard<'_, Guarded<T>>, msg: Outbound) -> Result<()> {
        if guard.closed {
            tracing::trace!(kind = msg.kind().as_str(), "write after close dropped");
            return Ok(());
        }

        let res = guard.transport.write(msg).await;
        if let Err(e) = &res {
            tracing::warn!(error = %e, code = e.code(), "write failed; closing connection");
            self.close_locked(guard).await;
        }
        res
    }

    async fn close_locked(&self, guard: &mut MutexGuard<'_, Guarded<T>>) {
        guard.closed = true;
        self.shutdown.trigger();
        tracing::debug!(strategy = Strategy::Mutex.as_str(), "closing transport");

        if let Err(e) = guard.transport.close().await {
            tracing::debug!(error = %e, "transport close reported an error");
        }
    }
}

#[async_trait]
impl<T: Transport> Serializer for MutexConn<T> {
    fn strategy(&self) -> Strategy {
        Strategy::Mutex
    }

    async fn submit(&self, msg: Outbound) -> Result<()> {
        let mut guard = self.inner.lock().await;
        self.write_locked(&mut guard, msg).await
    }

    async fn probe(&self) -> Result<()> {
        self.ping().await
    }

    async fn close(&self) {
        MutexConn::close(self).await
    }

    fn shutdown(&self) -> &ShutdownSignal {
        &self.shutdown
    }
}
