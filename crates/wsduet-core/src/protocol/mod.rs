//! Protocol modules.
//!
//! Only the outbound side has a shape of its own: a kind tag (text or ping)
//! plus an opaque payload. Framing is left to the transport, one native frame
//! per message.

pub mod outbound;
