//! Audit sinks for event operations

use std::sync::Mutex;

use axum_helpers::{AuditEvent, AuditOutcome};
use serde_json::Value;

/// One successful service operation.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    pub operation: &'static str,
    /// `event:<id>`; absent for list
    pub resource: Option<String>,
    pub params: Value,
}

/// Destination for audit records. Recording never fails the operation.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: AuditRecord);
}

/// Emits records on the `audit` tracing target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: AuditRecord) {
        let mut event = AuditEvent::new(record.operation, AuditOutcome::Success);
        if let Some(resource) = record.resource {
            event = event.with_resource(resource);
        }
        event.with_details(record.params).log();
    }
}

/// Keeps records in memory, for assertions in tests.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn operations(&self) -> Vec<&'static str> {
        self.records().iter().map(|r| r.operation).collect()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: AuditRecord) {
        match self.records.lock() {
            Ok(mut records) => records.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemoryAuditSink::new();
        sink.record(AuditRecord {
            operation: "findEvents",
            resource: None,
            params: json!({ "offset": 0, "limit": 10 }),
        });
        sink.record(AuditRecord {
            operation: "cancelEvent",
            resource: Some("event:e1".into()),
            params: json!({ "id": "e1" }),
        });

        assert_eq!(sink.operations(), vec!["findEvents", "cancelEvent"]);
        assert_eq!(sink.records()[1].resource.as_deref(), Some("event:e1"));
    }

    #[test]
    fn test_tracing_sink_does_not_panic_without_subscriber() {
        TracingAuditSink.record(AuditRecord {
            operation: "findEvent",
            resource: Some("event:e1".into()),
            params: json!({ "id": "e1" }),
        });
    }
}
