use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::adapters::notifier::AlertPublisher;
use crate::adapters::object_listing::ObjectLister;
use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::handlers::scan::scan_bucket;
use crate::runtime::alert::{stale_account_alert, AuditSummary};

/// Scheduled audit: scan the configured bucket and alert on stale accounts.
///
/// The trigger payload only gets logged; what to scan comes from `config`.
pub fn handle_audit_event(
    event: &Value,
    config: &AuditConfig,
    now: DateTime<Utc>,
    lister: &dyn ObjectLister,
    publisher: &dyn AlertPublisher,
) -> Result<AuditSummary, AuditError> {
    tracing::info!(component = "audit_handler", event = %event, "audit triggered");

    let scan = scan_bucket(&config.bucket, config.time_zone, now, lister)?;
    let summary = scan.summary();

    // TODO: decide whether stale regions of otherwise active accounts should alert too.
    let Some(alert) = stale_account_alert(&scan.classification) else {
        tracing::info!(component = "audit_handler", "All CloudTrails are up to date");
        return Ok(summary);
    };

    tracing::warn!(
        component = "audit_handler",
        accounts = ?summary.stale_accounts,
        "Found disabled CloudTrails"
    );
    let message_id = publisher
        .publish(&config.topic_arn, &alert)
        .map_err(|message| AuditError::NotificationFailure {
            destination: config.topic_arn.clone(),
            message,
        })?;
    tracing::info!(
        component = "audit_handler",
        topic_arn = %config.topic_arn,
        message_id = %message_id,
        "alert published"
    );

    Ok(summary.with_notification_id(message_id))
}
