//! [`Transport`] over the write half of an upgraded axum WebSocket.

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::SinkExt;

use wsduet_core::error::{DuetError, Result};
use wsduet_core::protocol::outbound::Outbound;

use super::{codec, Transport};

pub struct WsTransport {
    sink: SplitSink<WebSocket, Message>,
}

impl WsTransport {
    pub fn new(sink: SplitSink<WebSocket, Message>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn write(&mut self, msg: Outbound) -> Result<()> {
        let frame = codec::encode(msg)?;
        self.sink
            .send(frame)
            .await
            .map_err(|e| DuetError::Write(e.to_string()))
    }

    /// Sends a close frame and flushes.
    async fn close(&mut self) -> Result<()> {
        self.sink
            .close()
            .await
            .map_err(|e| DuetError::Write(format!("close: {e}")))
    }
}
