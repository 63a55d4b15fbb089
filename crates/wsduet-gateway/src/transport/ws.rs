//! WebSocket upgrade handlers.
//!
//! Responsibilities:
//! - Upgrade HTTP -> WS on `/channels` (actor serializer) and `/mutexes` (mutex serializer)
//! - Log and count failed upgrades; no connection is created for them
//! - Wrap the write half in a metered transport and hand it to the serializer
//! - Run the inbound reader: read failure, end of stream or a Close frame shut the connection down
//! - Tracing span per connection (`strategy`, `conn_id`)

use std::sync::Arc;

use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, State},
    response::Response,
};
use futures_util::{Stream, StreamExt};
use tracing::Instrument;

use wsduet_core::error::DuetError;
use wsduet_core::protocol::outbound::Outbound;

use crate::app_state::AppState;
use crate::serializer::{actor::ActorConn, mutex::MutexConn, Serializer, Strategy};
use crate::session;
use crate::transport::codec::{decode, Inbound};
use crate::transport::metered::Metered;
use crate::transport::socket::WsTransport;

// --------------------
// Entry
// --------------------
pub async fn channels_upgrade(State(app): State<AppState>, ws: WebSocketUpgrade) -> Response {
    upgrade(app, ws, Strategy::Actor)
}

pub async fn mutexes_upgrade(State(app): State<AppState>, ws: WebSocketUpgrade) -> Response {
    upgrade(app, ws, Strategy::Mutex)
}

fn upgrade(app: AppState, ws: WebSocketUpgrade, strategy: Strategy) -> Response {
    let metrics = app.metrics();
    ws.on_failed_upgrade(move |e: axum::Error| {
        let err = DuetError::Upgrade(e.to_string());
        metrics.upgrade_failures.inc(&[("strategy", strategy.as_str())]);
        tracing::warn!(strategy = strategy.as_str(), error = %err, "upgrade failed");
    })
    .on_upgrade(move |socket| {
        let span = tracing::info_span!("conn", strategy = strategy.as_str(), conn_id = app.next_conn_id());
        run_socket(app, strategy, socket).instrument(span)
    })
}

// --------------------
// Connection lifecycle
// --------------------
async fn run_socket(app: AppState, strategy: Strategy, socket: WebSocket) {
    let metrics = app.metrics();
    let labels = [("strategy", strategy.as_str())];
    metrics.sessions.inc(&labels);
    metrics.sessions_active.inc(&labels);
    tracing::info!("connection opened");

    let (sink, stream) = socket.split();
    let transport = Metered::new(WsTransport::new(sink), app.metrics(), strategy);

    let cfg = app.cfg();
    let emitters = cfg.producers.emitters();
    let echo = cfg.gateway.echo_inbound;

    match strategy {
        Strategy::Actor => {
            let (conn, writer) = ActorConn::spawn(transport, cfg.actor.queue_capacity);
            let reader = tokio::spawn(read_loop(stream, Arc::clone(&conn), echo).in_current_span());
            session::drive(conn, emitters, vec![writer, reader]).await;
        }
        Strategy::Mutex => {
            let conn = Arc::new(MutexConn::new(transport));
            let reader = tokio::spawn(read_loop(stream, Arc::clone(&conn), echo).in_current_span());
            session::drive(conn, emitters, vec![reader]).await;
        }
    }

    metrics.sessions_active.dec(&labels);
    tracing::info!("connection closed");
}

// --------------------
// Inbound reader
// --------------------

/// Drain inbound frames until the peer goes away or the connection shuts down.
///
/// Echoed text goes back through `conn`, never to the transport directly.
pub async fn read_loop<St, S>(mut stream: St, conn: Arc<S>, echo: bool)
where
    St: Stream<Item = Result<Message, axum::Error>> + Unpin + Send,
    S: Serializer + ?Sized,
{
    let shutdown = conn.shutdown().clone();

    loop {
        let next = tokio::select! {
            _ = shutdown.triggered() => return,
            next = stream.next() => next,
        };

        match next {
            None => {
                tracing::debug!("inbound stream ended");
                break;
            }
            Some(Err(e)) => {
                let err = DuetError::Read(e.to_string());
                tracing::warn!(error = %err, code = err.code(), "read failed; closing connection");
                break;
            }
            Some(Ok(msg)) => match decode(msg) {
                Inbound::Close => {
                    tracing::debug!("close frame received");
                    break;
                }
                Inbound::Text(text) if echo => {
                    if let Err(e) = conn.submit(Outbound::text(text)).await {
                        tracing::warn!(error = %e, "echo failed; closing connection");
                        break;
                    }
                }
                // Pings are answered by the websocket layer itself.
                Inbound::Text(_) | Inbound::Binary(_) | Inbound::Ping(_) | Inbound::Pong(_) => {}
            },
        }
    }

    conn.close().await;
}
