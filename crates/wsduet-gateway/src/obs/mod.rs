//! Lightweight in-process metrics (dependency-free).
//!
//! Counters, gauges and one latency histogram stored as atomics in `DashMap`s,
//! rendered in Prometheus text format by the `/metrics` handler.

pub mod metrics;
