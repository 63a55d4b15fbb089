//! Connection serializers.
//!
//! A transport accepts one writer at a time. Two interchangeable strategies
//! funnel several producers into it:
//! - [`actor::ActorConn`]: producers enqueue into a bounded queue; one writer
//!   task owns the transport and is the only caller of `Transport::write`.
//! - [`mutex::MutexConn`]: producers write directly while holding a lock that
//!   also guards the closed flag.
//!
//! Both expose the same [`Serializer`] surface and the same one-shot
//! [`ShutdownSignal`], so producers and the session driver do not care which
//! strategy they run on.

pub mod actor;
pub mod mutex;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use wsduet_core::protocol::outbound::Outbound;
use wsduet_core::Result;

/// Serialization strategy, also the route and metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Actor,
    Mutex,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Actor => "actor",
            Strategy::Mutex => "mutex",
        }
    }

    pub fn route(self) -> &'static str {
        match self {
            Strategy::Actor => "/channels",
            Strategy::Mutex => "/mutexes",
        }
    }
}

/// One-shot cancellation latch for a connection.
///
/// Flips `false -> true` once and never back. Any number of tasks may trigger
/// it concurrently; exactly one of them observes `trigger() == true`.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Latch the signal. Returns `true` only for the call that flipped it.
    pub fn trigger(&self) -> bool {
        self.tx.send_if_modified(|fired| {
            if *fired {
                false
            } else {
                *fired = true;
                true
            }
        })
    }

    /// Best-effort snapshot; not a synchronization point.
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once the signal has fired (immediately if it already has).
    pub async fn triggered(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this cannot observe a closed channel.
        let _ = rx.wait_for(|fired| *fired).await;
    }
}

/// Common surface of both connection serializers.
///
/// Writes after close are silently dropped and report `Ok(())`; callers cannot
/// tell "delivered" apart from "dropped because closed".
#[async_trait]
pub trait Serializer: Send + Sync + 'static {
    fn strategy(&self) -> Strategy;

    /// Submit a message. For the actor this is an enqueue and never fails;
    /// for the mutex it is the write itself and returns its outcome.
    async fn submit(&self, msg: Outbound) -> Result<()>;

    /// Liveness probe path.
    async fn probe(&self) -> Result<()> {
        self.submit(Outbound::ping()).await
    }

    /// Idempotent; safe to call concurrently from any task.
    async fn close(&self);

    fn shutdown(&self) -> &ShutdownSignal;
}
