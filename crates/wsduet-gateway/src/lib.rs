//! wsDuet gateway library entry.
//!
//! Two ways of sharing one WebSocket among several concurrent producers:
//! an actor serializer (queue + single writer task) and a mutex serializer
//! (direct writes under a lock). Both are wired to the same producers, the
//! same per-connection lifecycle and the same HTTP surface. Consumed by the
//! binary (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod producer;
pub mod router;
pub mod serializer;
pub mod session;
pub mod transport;
