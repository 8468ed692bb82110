//! Best-effort activity (audit) logging.
//!
//! Every logged action becomes one immutable [`ActivityLogEntry`] row in the
//! append-only `activity_logs` table. Logging is diagnostic, not
//! transactional: [`log_activity`] makes exactly one write attempt, reports
//! failures through `tracing` (and therefore Sentry), and never hands an error
//! back to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use ansania_core::{ActivityData, UserId, log_activity};
//!
//! let _ = log_activity(
//!     &sink,
//!     "user.login",
//!     ActivityData {
//!         user_id: Some(UserId::new(42)),
//!         ..Default::default()
//!     },
//! )
//! .await;
//! ```

#[cfg(feature = "postgres")]
mod postgres;

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::UserId;

#[cfg(feature = "postgres")]
pub use postgres::PgActivitySink;

/// One row of the activity log.
///
/// Every optional field is always present; `None` is the explicit "no value"
/// marker and is persisted as SQL `NULL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    /// Acting user, if known.
    pub user_id: Option<UserId>,
    /// Dotted action label, e.g. `user.login` or `banner.updated`.
    pub action: String,
    /// Kind of entity the action touched, e.g. `banner`.
    pub entity_type: Option<String>,
    /// ID of the entity the action touched.
    pub entity_id: Option<i64>,
    /// Client IP address.
    pub ip_address: Option<String>,
    /// Client user agent.
    pub user_agent: Option<String>,
    /// Free-form structured payload.
    pub metadata: Option<serde_json::Value>,
}

/// Optional fields supplied alongside an action.
///
/// Build with struct update syntax so omitted fields default to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityData {
    pub user_id: Option<UserId>,
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl ActivityLogEntry {
    /// Build an entry from an action label and its optional fields.
    ///
    /// Blank strings and JSON `null` metadata are normalised to `None`, so
    /// the persisted shape is uniform regardless of how callers fill it in.
    #[must_use]
    pub fn new(action: impl Into<String>, data: ActivityData) -> Self {
        Self {
            user_id: data.user_id,
            action: action.into().trim().to_string(),
            entity_type: non_blank(data.entity_type),
            entity_id: data.entity_id,
            ip_address: non_blank(data.ip_address),
            user_agent: non_blank(data.user_agent),
            metadata: data.metadata.filter(|m| !m.is_null()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Errors raised by an [`ActivitySink`].
///
/// These never leave [`log_activity`].
#[derive(Debug, Error)]
pub enum ActivityLogError {
    /// The entry was rejected before reaching the sink.
    #[error("invalid activity entry: {0}")]
    Validation(String),

    /// The sink failed to persist the entry.
    #[error("activity log write failed: {0}")]
    Write(String),

    /// Database error from sqlx.
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Destination for activity log entries.
pub trait ActivitySink: Send + Sync {
    /// Persist a single entry.
    fn record(
        &self,
        entry: &ActivityLogEntry,
    ) -> impl Future<Output = Result<(), ActivityLogError>> + Send;
}

/// What happened to a logged action.
///
/// Callers are free to ignore this; it exists so the "never fails" contract
/// is visible in the signature rather than hidden behind suppressed errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutcome {
    /// The entry was written.
    Recorded,
    /// The write failed and the entry was discarded.
    Dropped,
}

impl LogOutcome {
    /// Returns `true` if the entry was written.
    #[must_use]
    pub const fn is_recorded(self) -> bool {
        matches!(self, Self::Recorded)
    }
}

/// Record one action, swallowing any failure.
///
/// Makes a single write attempt with no retry. Failures are reported with
/// `tracing::error!` for operator visibility and yield [`LogOutcome::Dropped`].
pub async fn log_activity<S: ActivitySink>(
    sink: &S,
    action: &str,
    data: ActivityData,
) -> LogOutcome {
    let entry = ActivityLogEntry::new(action, data);

    let result = if entry.action.is_empty() {
        Err(ActivityLogError::Validation(
            "action must not be empty".to_string(),
        ))
    } else {
        sink.record(&entry).await
    };

    match result {
        Ok(()) => {
            tracing::debug!(
                action = %entry.action,
                entity_type = entry.entity_type.as_deref(),
                entity_id = entry.entity_id,
                "Activity recorded"
            );
            LogOutcome::Recorded
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                action = %entry.action,
                entity_type = entry.entity_type.as_deref(),
                entity_id = entry.entity_id,
                "Failed to record activity"
            );
            LogOutcome::Dropped
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        entries: Mutex<Vec<ActivityLogEntry>>,
    }

    impl RecordingSink {
        fn entries(&self) -> Vec<ActivityLogEntry> {
            self.entries.lock().unwrap().clone()
        }
    }

    impl ActivitySink for RecordingSink {
        async fn record(&self, entry: &ActivityLogEntry) -> Result<(), ActivityLogError> {
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl ActivitySink for FailingSink {
        async fn record(&self, _entry: &ActivityLogEntry) -> Result<(), ActivityLogError> {
            Err(ActivityLogError::Write("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_user_login_with_only_actor() {
        let sink = RecordingSink::default();

        let outcome = log_activity(
            &sink,
            "user.login",
            ActivityData {
                user_id: Some(UserId::new(42)),
                ..Default::default()
            },
        )
        .await;

        assert_eq!(outcome, LogOutcome::Recorded);
        assert_eq!(
            sink.entries(),
            vec![ActivityLogEntry {
                user_id: Some(UserId::new(42)),
                action: "user.login".to_string(),
                entity_type: None,
                entity_id: None,
                ip_address: None,
                user_agent: None,
                metadata: None,
            }]
        );
    }

    #[tokio::test]
    async fn test_action_only_sets_every_optional_to_none() {
        let sink = RecordingSink::default();

        let outcome = log_activity(&sink, "cache.flushed", ActivityData::default()).await;

        assert!(outcome.is_recorded());
        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        let entry = entries.first().unwrap();
        assert_eq!(entry.action, "cache.flushed");
        assert!(entry.user_id.is_none());
        assert!(entry.entity_type.is_none());
        assert!(entry.entity_id.is_none());
        assert!(entry.ip_address.is_none());
        assert!(entry.user_agent.is_none());
        assert!(entry.metadata.is_none());
    }

    #[tokio::test]
    async fn test_failing_sink_is_swallowed() {
        let outcome = log_activity(
            &FailingSink,
            "voucher.created",
            ActivityData {
                entity_type: Some("voucher".to_string()),
                entity_id: Some(3),
                ..Default::default()
            },
        )
        .await;

        assert_eq!(outcome, LogOutcome::Dropped);
    }

    #[tokio::test]
    async fn test_empty_action_is_dropped_without_write() {
        let sink = RecordingSink::default();

        let outcome = log_activity(&sink, "   ", ActivityData::default()).await;

        assert_eq!(outcome, LogOutcome::Dropped);
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_entry_normalises_blank_values() {
        let entry = ActivityLogEntry::new(
            "banner.updated",
            ActivityData {
                entity_type: Some("banner".to_string()),
                entity_id: Some(7),
                ip_address: Some(String::new()),
                user_agent: Some("   ".to_string()),
                metadata: Some(serde_json::Value::Null),
                ..Default::default()
            },
        );

        assert_eq!(entry.entity_type.as_deref(), Some("banner"));
        assert_eq!(entry.entity_id, Some(7));
        assert!(entry.ip_address.is_none());
        assert!(entry.user_agent.is_none());
        assert!(entry.metadata.is_none());
    }

    #[test]
    fn test_entry_keeps_provenance() {
        let entry = ActivityLogEntry::new(
            "page.created",
            ActivityData {
                ip_address: Some("203.0.113.7".to_string()),
                user_agent: Some("Mozilla/5.0".to_string()),
                metadata: Some(serde_json::json!({ "request_id": "abc" })),
                ..Default::default()
            },
        );

        assert_eq!(entry.ip_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(entry.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(
            entry.metadata,
            Some(serde_json::json!({ "request_id": "abc" }))
        );
    }
}
