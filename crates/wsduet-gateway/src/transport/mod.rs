//! Transport layer (WebSocket).
//!
//! [`Transport`] is the single-writer seam both serializers protect. The axum
//! socket adapter, the metrics decorator, the frame codec and the upgrade
//! handlers live in the submodules.

pub mod codec;
pub mod metered;
pub mod socket;
pub mod ws;

use async_trait::async_trait;

use wsduet_core::protocol::outbound::Outbound;
use wsduet_core::Result;

/// Write half of a duplex connection, post-handshake.
///
/// `&mut self` on both methods: a transport has exactly one owner at a time,
/// and concurrent writers must go through a serializer.
#[async_trait]
pub trait Transport: Send + 'static {
    /// Write one message as one native frame.
    async fn write(&mut self, msg: Outbound) -> Result<()>;

    /// Tear the connection down. Serializers call this at most once.
    async fn close(&mut self) -> Result<()>;
}

