//! Top-level facade crate for wsDuet.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use wsduet_core::*;
}

pub mod gateway {
    pub use wsduet_gateway::*;
}
