//! Frame codec between wsDuet messages and axum WebSocket frames.
//!
//! - Outbound: one `Outbound` => one native frame (text or ping)
//! - Inbound: frames are surfaced by type for the read loop's lifecycle handling

use axum::extract::ws::Message;
use wsduet_core::{
    error::{DuetError, Result},
    protocol::outbound::{Outbound, OutboundKind},
};

#[derive(Debug, PartialEq, Eq)]
pub enum Inbound {
    Text(String),
    Binary(Vec<u8>),
    Ping(Vec<u8>),
    Pong(Vec<u8>),
    Close,
}

pub fn encode(msg: Outbound) -> Result<Message> {
    let (kind, payload) = msg.into_parts();
    match kind {
        OutboundKind::Text => {
            let s = String::from_utf8(payload.to_vec())
                .map_err(|e| DuetError::BadRequest(format!("text payload is not utf-8: {e}")))?;
            Ok(Message::Text(s))
        }
        OutboundKind::Ping => Ok(Message::Ping(payload.to_vec())),
    }
}

pub fn decode(msg: Message) -> Inbound {
    match msg {
        Message::Text(s) => Inbound::Text(s),
        Message::Binary(b) => Inbound::Binary(b),
        Message::Ping(v) => Inbound::Ping(v),
        Message::Pong(v) => Inbound::Pong(v),
        Message::Close(_) => Inbound::Close,
    }
}
