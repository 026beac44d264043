//! Per-detection timing records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::traits::TelemetrySink;
use crate::brain::intent::Intent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRecord {
    pub elapsed_ms: u64,
    pub primary_intent: Intent,
    pub timestamp: DateTime<Utc>,
}

impl TelemetryRecord {
    pub fn new(elapsed_ms: u64, primary_intent: Intent) -> Self {
        Self {
            elapsed_ms,
            primary_intent,
            timestamp: Utc::now(),
        }
    }
}

/// Emits records as structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn record(&self, record: &TelemetryRecord) {
        info!(
            target: "intent_telemetry",
            elapsed_ms = record.elapsed_ms,
            primary_intent = %record.primary_intent,
            "intent detected"
        );
    }
}
