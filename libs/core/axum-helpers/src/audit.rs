//! Structured audit records on the `audit` tracing target.
//!
//! ```ignore
//! use axum_helpers::audit::{AuditEvent, AuditOutcome};
//!
//! AuditEvent::new("cancelEvent", AuditOutcome::Success)
//!     .with_resource("event:5f0c...")
//!     .with_details(json!({ "id": "5f0c..." }))
//!     .log();
//! ```
//!
//! Route these to a separate sink with `RUST_LOG=info,audit=info` and a
//! target filter in the collector.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    Failure,
}

/// One audited action. Build it, then call [`AuditEvent::log`].
#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// Operation name, e.g. `createEvent`
    pub action: String,
    /// Affected resource as `kind:id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    pub outcome: AuditOutcome,
    pub timestamp: DateTime<Utc>,
    /// Operation inputs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: impl Into<String>, outcome: AuditOutcome) -> Self {
        Self {
            action: action.into(),
            resource: None,
            outcome,
            timestamp: Utc::now(),
            details: None,
        }
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Attach `details`; values that fail to serialize are dropped.
    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    pub fn log(self) {
        let details = self
            .details
            .as_ref()
            .map(serde_json::Value::to_string)
            .unwrap_or_default();

        tracing::info!(
            target: "audit",
            action = %self.action,
            resource = self.resource.as_deref(),
            outcome = ?self.outcome,
            timestamp = %self.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            details = %details,
            "audit"
        );
    }
}
