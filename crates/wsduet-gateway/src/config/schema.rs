use std::time::Duration;

use serde::Deserialize;
use wsduet_core::error::{DuetError, Result};

use crate::producer::{Emitter, PROBE_INTERVAL, TEXT_INTERVAL};
use crate::serializer::actor::DEFAULT_QUEUE_CAPACITY;

const INTERVAL_RANGE_MS: std::ops::RangeInclusive<u64> = 10..=60_000;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub producers: ProducerSection,

    #[serde(default)]
    pub actor: ActorSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(DuetError::UnsupportedVersion);
        }
        self.producers.validate()?;
        self.actor.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Landing page served at `/`.
    #[serde(default = "default_index_path")]
    pub index_path: String,

    /// Echo inbound text frames back through the connection's serializer.
    #[serde(default)]
    pub echo_inbound: bool,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            index_path: default_index_path(),
            echo_inbound: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProducerSection {
    /// One periodic text emitter per entry.
    #[serde(default = "default_payloads")]
    pub payloads: Vec<String>,

    #[serde(default = "default_text_interval_ms")]
    pub text_interval_ms: u64,

    #[serde(default = "default_probe_interval_ms")]
    pub probe_interval_ms: u64,
}

impl Default for ProducerSection {
    fn default() -> Self {
        Self {
            payloads: default_payloads(),
            text_interval_ms: default_text_interval_ms(),
            probe_interval_ms: default_probe_interval_ms(),
        }
    }
}

impl ProducerSection {
    pub fn validate(&self) -> Result<()> {
        if self.payloads.is_empty() {
            return Err(DuetError::Config("producers.payloads must not be empty".into()));
        }
        if self.payloads.iter().any(|p| p.trim().is_empty()) {
            return Err(DuetError::Config("producers.payloads must not contain blank entries".into()));
        }
        if !INTERVAL_RANGE_MS.contains(&self.text_interval_ms) {
            return Err(DuetError::Config(
                "producers.text_interval_ms must be between 10 and 60000".into(),
            ));
        }
        if !INTERVAL_RANGE_MS.contains(&self.probe_interval_ms) {
            return Err(DuetError::Config(
                "producers.probe_interval_ms must be between 10 and 60000".into(),
            ));
        }
        Ok(())
    }

    /// Producer set attached to every connection: one text emitter per
    /// payload plus the liveness probe.
    pub fn emitters(&self) -> Vec<Emitter> {
        let every = Duration::from_millis(self.text_interval_ms);
        let mut out: Vec<Emitter> = self
            .payloads
            .iter()
            .map(|p| Emitter::text(p.clone(), every))
            .collect();
        out.push(Emitter::probe(Duration::from_millis(self.probe_interval_ms)));
        out
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActorSection {
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for ActorSection {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl ActorSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=65_536).contains(&self.queue_capacity) {
            return Err(DuetError::Config(
                "actor.queue_capacity must be between 1 and 65536".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}
fn default_index_path() -> String {
    "index.html".into()
}
fn default_payloads() -> Vec<String> {
    vec!["blue".into(), "red".into()]
}
fn default_text_interval_ms() -> u64 {
    TEXT_INTERVAL.as_millis() as u64
}
fn default_probe_interval_ms() -> u64 {
    PROBE_INTERVAL.as_millis() as u64
}
fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}
