#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::timeout;

use wsduet_core::protocol::outbound::{Outbound, OutboundKind};
use wsduet_gateway::producer::Emitter;
use wsduet_gateway::serializer::mutex::MutexConn;
use wsduet_gateway::serializer::Serializer;
use wsduet_gateway::session;

use mock_transport::{is_blue_or_red, mock, mock_with, MockConfig};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_never_overlap() {
    let (t, log) = mock();
    let conn = Arc::new(MutexConn::new(t));

    let writers: Vec<_> = (0..8)
        .map(|i| {
            let conn = Arc::clone(&conn);
            tokio::spawn(async move {
                for j in 0..25 {
                    conn.write_text(format!("w{i}-{j}")).await.unwrap();
                }
            })
        })
        .collect();
    for w in writers {
        w.await.unwrap();
    }

    assert_eq!(log.frame_count(), 200);
    assert_eq!(log.overlaps(), 0);

    // Per-writer order survives any interleaving.
    for i in 0..8 {
        let prefix = format!("w{i}-");
        let seq: Vec<u32> = log
            .texts()
            .iter()
            .filter_map(|s| s.strip_prefix(&prefix).map(|n| n.parse().unwrap()))
            .collect();
        assert_eq!(seq, (0..25).collect::<Vec<u32>>());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn two_producers_yield_ten_whole_frames() {
    let (t, log) = mock();
    let conn = Arc::new(MutexConn::new(t));

    let producers: Vec<_> = ["blue", "red"]
        .into_iter()
        .map(|color| {
            let conn = Arc::clone(&conn);
            tokio::spawn(async move {
                for _ in 0..5 {
                    conn.write(OutboundKind::Text, Bytes::from_static(color.as_bytes()))
                        .await
                        .unwrap();
                }
            })
        })
        .collect();
    for p in producers {
        p.await.unwrap();
    }

    let frames = log.frames();
    assert_eq!(frames.len(), 10);
    assert!(frames.iter().all(is_blue_or_red));
    assert_eq!(log.overlaps(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_close_closes_transport_once() {
    let (t, log) = mock();
    let conn = Arc::new(MutexConn::new(t));

    let closers: Vec<_> = (0..16)
        .map(|_| {
            let conn = Arc::clone(&conn);
            tokio::spawn(async move { conn.close().await })
        })
        .collect();
    for c in closers {
        c.await.unwrap();
    }

    assert!(conn.is_closed().await);
    assert!(conn.shutdown().is_triggered());
    assert_eq!(log.closes(), 1);
}

#[tokio::test]
async fn writes_after_close_are_silent() {
    let (t, log) = mock();
    let conn = MutexConn::new(t);

    conn.close().await;

    conn.write_text("blue").await.unwrap();
    conn.write(OutboundKind::Text, Bytes::from_static(b"red")).await.unwrap();
    conn.ping().await.unwrap();
    conn.submit(Outbound::text("blue")).await.unwrap();
    conn.probe().await.unwrap();

    assert_eq!(log.attempts(), 0);
    assert_eq!(log.closes(), 1);
}

#[tokio::test]
async fn rejected_payload_leaves_connection_open() {
    let (t, log) = mock();
    let conn = MutexConn::new(t);

    let err = conn
        .write(OutboundKind::Text, Bytes::from_static(&[0xff, 0xfe]))
        .await
        .expect_err("invalid utf-8 is rejected");
    assert_eq!(err.code(), "BAD_REQUEST");
    assert!(!conn.is_closed().await);

    conn.write_text("blue").await.unwrap();
    assert_eq!(log.texts(), vec!["blue"]);
}

#[tokio::test]
async fn failed_write_closes_before_releasing_lock() {
    let (t, log) = mock_with(MockConfig {
        fail_on: Some(1),
        ..Default::default()
    });
    let conn = MutexConn::new(t);

    let err = conn.write_text("blue").await.expect_err("injected failure");
    assert_eq!(err.code(), "WRITE_FAILED");
    assert!(conn.is_closed().await);
    assert!(conn.shutdown().is_triggered());
    assert_eq!(log.closes(), 1);

    // The producer's own close after the failure is a no-op.
    conn.close().await;
    conn.write_text("red").await.unwrap();
    assert_eq!(log.attempts(), 1);
    assert_eq!(log.closes(), 1);
}

#[tokio::test]
async fn ping_goes_out_as_empty_probe() {
    let (t, log) = mock();
    let conn = MutexConn::new(t);

    conn.ping().await.unwrap();

    let frames = log.frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].kind(), OutboundKind::Ping);
    assert!(frames[0].payload().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn write_failure_stops_every_producer() {
    let (t, log) = mock_with(MockConfig {
        fail_on: Some(5),
        ..Default::default()
    });
    let conn = Arc::new(MutexConn::new(t));
    let emitters = vec![
        Emitter::text("blue", Duration::from_millis(10)),
        Emitter::text("red", Duration::from_millis(10)),
        Emitter::probe(Duration::from_millis(40)),
    ];

    timeout(
        Duration::from_millis(1000),
        session::drive(Arc::clone(&conn), emitters, Vec::new()),
    )
    .await
    .expect("all producers exit after the failure");

    assert_eq!(log.attempts(), 5);
    assert_eq!(log.frame_count(), 4);
    assert_eq!(log.closes(), 1);

    conn.write_text("late").await.unwrap();
    assert_eq!(log.attempts(), 5);
    assert_eq!(log.writes_after_close(), 0);
}
