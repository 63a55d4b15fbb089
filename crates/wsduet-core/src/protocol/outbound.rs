//! Outbound message shape shared by both serializers.

use bytes::Bytes;

use crate::error::{DuetError, Result};

/// Largest payload a ping control frame may carry.
pub const MAX_PING_PAYLOAD: usize = 125;

/// Native frame type an outbound message maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutboundKind {
    Text,
    Ping,
}

impl OutboundKind {
    /// Label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            OutboundKind::Text => "text",
            OutboundKind::Ping => "ping",
        }
    }
}

/// One outbound frame. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    kind: OutboundKind,
    payload: Bytes,
}

impl Outbound {
    /// Build from an opaque payload, checking it fits the frame kind.
    pub fn new(kind: OutboundKind, payload: Bytes) -> Result<Self> {
        match kind {
            OutboundKind::Text => {
                std::str::from_utf8(&payload)
                    .map_err(|e| DuetError::BadRequest(format!("text payload is not utf-8: {e}")))?;
            }
            OutboundKind::Ping => {
                if payload.len() > MAX_PING_PAYLOAD {
                    return Err(DuetError::BadRequest(format!(
                        "ping payload is {} bytes, limit is {MAX_PING_PAYLOAD}",
                        payload.len()
                    )));
                }
            }
        }
        Ok(Self { kind, payload })
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self {
            kind: OutboundKind::Text,
            payload: Bytes::from(s.into()),
        }
    }

    /// Liveness probe (empty payload).
    pub fn ping() -> Self {
        Self {
            kind: OutboundKind::Ping,
            payload: Bytes::new(),
        }
    }

    pub fn kind(&self) -> OutboundKind {
        self.kind
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Payload as text, when the kind is `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self.kind {
            OutboundKind::Text => std::str::from_utf8(&self.payload).ok(),
            OutboundKind::Ping => None,
        }
    }

    pub fn into_parts(self) -> (OutboundKind, Bytes) {
        (self.kind, self.payload)
    }
}
