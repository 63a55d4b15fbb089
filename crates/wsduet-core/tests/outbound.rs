//! Outbound message construction rules.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use bytes::Bytes;

use wsduet_core::protocol::outbound::{Outbound, OutboundKind, MAX_PING_PAYLOAD};

#[test]
fn text_constructor_keeps_payload() {
    let m = Outbound::text("blue");
    assert_eq!(m.kind(), OutboundKind::Text);
    assert_eq!(m.as_text(), Some("blue"));
    assert_eq!(m.payload().as_ref(), b"blue");
}

#[test]
fn ping_is_empty() {
    let m = Outbound::ping();
    assert_eq!(m.kind(), OutboundKind::Ping);
    assert!(m.payload().is_empty());
    assert!(m.as_text().is_none());
}

#[test]
fn opaque_text_must_be_utf8() {
    let err = Outbound::new(OutboundKind::Text, Bytes::from_static(&[0xff, 0xfe]))
        .expect_err("invalid utf-8 must fail");
    assert_eq!(err.code(), "BAD_REQUEST");

    let ok = Outbound::new(OutboundKind::Text, Bytes::from_static(b"red")).unwrap();
    assert_eq!(ok, Outbound::text("red"));
}

#[test]
fn ping_payload_is_bounded() {
    let at_limit = Bytes::from(vec![0u8; MAX_PING_PAYLOAD]);
    assert!(Outbound::new(OutboundKind::Ping, at_limit).is_ok());

    let over = Bytes::from(vec![0u8; MAX_PING_PAYLOAD + 1]);
    let err = Outbound::new(OutboundKind::Ping, over).expect_err("oversized ping must fail");
    assert_eq!(err.code(), "BAD_REQUEST");
}

#[test]
fn into_parts_round_trips_kind() {
    let (kind, payload) = Outbound::text("red").into_parts();
    assert_eq!(kind, OutboundKind::Text);
    assert_eq!(payload, Bytes::from_static(b"red"));
}
