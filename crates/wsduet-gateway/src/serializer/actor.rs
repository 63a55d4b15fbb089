//! Actor serializer: bounded queue + single writer task.
//!
//! Producers never touch the transport. They enqueue into a bounded FIFO and
//! the writer task, which owns the transport outright, drains it one frame at
//! a time. Mutual exclusion on the transport is structural: only one task can
//! reach `Transport::write`.
//!
//! Lifecycle:
//! - a write failure latches the shutdown signal and ends the writer;
//! - `close()` latches the signal; the writer notices, abandoning a write
//!   still in flight, and exits;
//! - on exit the writer closes the transport, so it is closed exactly once.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;

use wsduet_core::protocol::outbound::Outbound;
use wsduet_core::Result;

use super::{Serializer, ShutdownSignal, Strategy};
use crate::transport::Transport;

/// Pending messages the queue holds before `enqueue` starts waiting.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Queue-fronted connection handle, shared by all producers of one connection.
#[derive(Debug)]
pub struct ActorConn {
    queue: mpsc::Sender<Outbound>,
    shutdown: ShutdownSignal,
}

impl ActorConn {
    /// Take ownership of `transport` and spawn its writer task.
    ///
    /// The returned handle resolves once the writer has exited and closed the
    /// transport.
    pub fn spawn<T: Transport>(transport: T, capacity: usize) -> (Arc<Self>, JoinHandle<()>) {
        let (queue, rx) = mpsc::channel(capacity.max(1));
        let shutdown = ShutdownSignal::new();

        let writer = tokio::spawn(write_loop(transport, rx, shutdown.clone()).in_current_span());

        (Arc::new(Self { queue, shutdown }), writer)
    }

    /// Queue a message for the writer.
    ///
    /// Waits while the queue is full, until space frees or the connection
    /// closes. After close the message is dropped without error.
    pub async fn enqueue(&self, msg: Outbound) {
        if self.shutdown.is_triggered() {
            tracing::trace!(kind = msg.kind().as_str(), "enqueue after close dropped");
            return;
        }

        tokio::select! {
            biased;
            _ = self.shutdown.triggered() => {
                tracing::trace!("enqueue abandoned: connection closed while queue was full");
            }
            sent = self.queue.send(msg) => {
                if sent.is_err() {
                    tracing::trace!("enqueue after writer exit dropped");
                }
            }
        }
    }

    /// Pending messages not yet taken by the writer.
    pub fn queued(&self) -> usize {
        self.queue.max_capacity() - self.queue.capacity()
    }

    fn request_close(&self) {
        if self.shutdown.trigger() {
            tracing::debug!(strategy = Strategy::Actor.as_str(), "close requested");
        } else {
            tracing::debug!(strategy = Strategy::Actor.as_str(), "close on closed connection ignored");
        }
    }
}

#[async_trait]
impl Serializer for ActorConn {
    fn strategy(&self) -> Strategy {
        Strategy::Actor
    }

    async fn submit(&self, msg: Outbound) -> Result<()> {
        self.enqueue(msg).await;
        Ok(())
    }

    async fn close(&self) {
        self.request_close();
    }

    fn shutdown(&self) -> &ShutdownSignal {
        &self.shutdown
    }
}

/// The only code path that writes to the transport.
async fn write_loop<T: Transport>(
    mut transport: T,
    mut rx: mpsc::Receiver<Outbound>,
    shutdown: ShutdownSignal,
) {
    loop {
        tokio::select! {
            // Shutdown wins over pending messages: nothing is written once it fires.
            biased;
            _ = shutdown.triggered() => break,
            next = rx.recv() => {
                let Some(msg) = next else {
                    // Every handle is gone; nobody can observe this connection anymore.
                    shutdown.trigger();
                    break;
                };
                // A peer that stopped reading can park the write; close must still get through.
                let written = tokio::select! {
                    biased;
                    _ = shutdown.triggered() => {
                        tracing::debug!("in-flight write abandoned at close");
                        break;
                    }
                    res = transport.write(msg) => res,
                };
                if let Err(e) = written {
                    tracing::warn!(error = %e, code = e.code(), "write failed; closing connection");
                    shutdown.trigger();
                    break;
                }
            }
        }
    }

    rx.close();
    let dropped = rx.len();
    if dropped > 0 {
        tracing::debug!(dropped, "queued messages discarded at close");
    }

    if let Err(e) = transport.close().await {
        tracing::debug!(error = %e, "transport close reported an error");
    }
    tracing::debug!("writer exited");
}
