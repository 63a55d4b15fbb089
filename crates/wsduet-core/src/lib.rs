//! wsDuet core: transport-agnostic outbound message primitives and the shared error type.
//!
//! This crate defines the message shape that both connection serializers carry
//! (`Outbound`: a kind tag plus opaque bytes) and the error surface used by the
//! gateway. It carries no transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `DuetError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{DuetError, Result};
