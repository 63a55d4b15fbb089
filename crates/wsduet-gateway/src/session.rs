//! Per-connection lifecycle shared by both strategies.
//!
//! Spawn the producers, wait for the shutdown signal, close the serializer
//! (no-op when a failure already did), then join every task belonging to the
//! connection so nothing outlives the handler.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::producer::{self, Emitter};
use crate::serializer::Serializer;

/// Drive one connection to completion.
///
/// `background` holds tasks created alongside the serializer (the actor's
/// writer, the inbound reader); they are joined after the producers.
pub async fn drive<S: Serializer>(conn: Arc<S>, emitters: Vec<Emitter>, background: Vec<JoinHandle<()>>) {
    let mut tasks: Vec<JoinHandle<()>> = emitters
        .into_iter()
        .map(|e| tokio::spawn(producer::run(Arc::clone(&conn), e).in_current_span()))
        .collect();

    conn.shutdown().triggered().await;
    conn.close().await;

    tasks.extend(background);
    for res in join_all(tasks).await {
        if let Err(e) = res {
            tracing::warn!(error = %e, "connection task ended abnormally");
        }
    }
}
