#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use wsduet_core::protocol::outbound::OutboundKind;
use wsduet_gateway::producer::{self, Emitter, EmitterKind, PROBE_INTERVAL, TEXT_INTERVAL};
use wsduet_gateway::serializer::actor::{ActorConn, DEFAULT_QUEUE_CAPACITY};
use wsduet_gateway::serializer::mutex::MutexConn;
use wsduet_gateway::serializer::Serializer;
use wsduet_gateway::session;

use mock_transport::{mock, wait_until};

#[test]
fn default_emitters_match_stock_schedule() {
    let e = Emitter::defaults();
    assert_eq!(e.len(), 3);
    assert_eq!(e[0].label(), "blue");
    assert_eq!(e[1].label(), "red");
    assert_eq!(e[2].label(), "probe");
    assert_eq!(e[0].every, Duration::from_millis(250));
    assert_eq!(e[1].every, TEXT_INTERVAL);
    assert_eq!(e[2].every, Duration::from_millis(1000));
    assert!(matches!(e[2].kind, EmitterKind::Probe));
}

#[tokio::test]
async fn producer_stops_within_its_interval() {
    let (t, log) = mock();
    let conn = Arc::new(MutexConn::new(t));

    let task = tokio::spawn(producer::run(Arc::clone(&conn), Emitter::text("blue", TEXT_INTERVAL)));
    wait_until(|| log.frame_count() >= 1).await;

    conn.close().await;
    timeout(TEXT_INTERVAL, task).await.expect("stops within one interval").unwrap();
    assert_eq!(log.writes_after_close(), 0);
}

#[tokio::test]
async fn producer_does_not_start_on_closed_connection() {
    let (t, log) = mock();
    let conn = Arc::new(MutexConn::new(t));
    conn.close().await;

    producer::run(Arc::clone(&conn), Emitter::text("red", TEXT_INTERVAL)).await;
    assert_eq!(log.attempts(), 0);
}

#[tokio::test]
async fn probe_emitter_sends_empty_pings() {
    let (t, log) = mock();
    let (conn, writer) = ActorConn::spawn(t, DEFAULT_QUEUE_CAPACITY);

    let task = tokio::spawn(producer::run(
        Arc::clone(&conn),
        Emitter::probe(Duration::from_millis(20)),
    ));
    wait_until(|| log.frame_count() >= 2).await;

    conn.close().await;
    task.await.unwrap();
    writer.await.unwrap();

    let frames = log.frames();
    assert!(frames.iter().all(|m| m.kind() == OutboundKind::Ping && m.payload().is_empty()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn external_close_ends_session_within_probe_interval() {
    let (t, log) = mock();
    let conn = Arc::new(MutexConn::new(t));

    let driver = tokio::spawn(session::drive(Arc::clone(&conn), Emitter::defaults(), Vec::new()));
    wait_until(|| log.frame_count() >= 3).await;

    conn.close().await;
    timeout(PROBE_INTERVAL, driver)
        .await
        .expect("session ends within the longest producer interval")
        .unwrap();

    assert_eq!(log.closes(), 1);
    assert_eq!(log.writes_after_close(), 0);
    assert!(log
        .frames()
        .iter()
        .any(|m| m.kind() == OutboundKind::Ping));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn actor_session_emits_all_three_streams() {
    let (t, log) = mock();
    let (conn, writer) = ActorConn::spawn(t, DEFAULT_QUEUE_CAPACITY);
    let emitters = vec![
        Emitter::text("blue", Duration::from_millis(10)),
        Emitter::text("red", Duration::from_millis(10)),
        Emitter::probe(Duration::from_millis(20)),
    ];

    let driver = tokio::spawn(session::drive(Arc::clone(&conn), emitters, vec![writer]));
    wait_until(|| {
        let texts = log.texts();
        texts.iter().any(|s| s == "blue")
            && texts.iter().any(|s| s == "red")
            && log.frames().iter().any(|m| m.kind() == OutboundKind::Ping)
    })
    .await;

    conn.close().await;
    timeout(Duration::from_secs(1), driver).await.unwrap().unwrap();
    assert_eq!(log.closes(), 1);
    assert_eq!(log.overlaps(), 0);
}
