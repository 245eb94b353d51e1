use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::adapters::object_listing::ObjectLister;
use crate::error::AuditError;
use crate::runtime::alert::AuditSummary;
use crate::runtime::discovery::{discover_activity, Discovery};
use crate::runtime::staleness::{classify, cutoff_for, ClassificationResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketScan {
    pub discovery: Discovery,
    pub classification: ClassificationResult,
}

impl BucketScan {
    pub fn summary(&self) -> AuditSummary {
        AuditSummary::new(&self.discovery, self.classification.clone())
    }
}

/// Lists the whole bucket, then discovers and classifies CloudTrail activity.
pub fn scan_bucket(
    bucket: &str,
    time_zone: Tz,
    now: DateTime<Utc>,
    lister: &dyn ObjectLister,
) -> Result<BucketScan, AuditError> {
    tracing::info!(component = "scan", bucket, "listing bucket");
    let objects = lister
        .list_objects(bucket)
        .map_err(|message| AuditError::ListingFailure {
            bucket: bucket.to_string(),
            message,
        })?;

    let discovery = discover_activity(objects);
    let cutoff = cutoff_for(now, time_zone);
    let classification = classify(&discovery.records, cutoff);

    tracing::info!(
        component = "scan",
        bucket,
        objects_scanned = discovery.objects_scanned,
        objects_skipped = discovery.objects_skipped,
        origins = discovery.records.len(),
        cutoff = %cutoff,
        time_zone = %time_zone,
        stale_accounts = classification.stale_accounts.len(),
        stale_groups = classification.stale_groups.len(),
        "scan completed"
    );
    for group in &classification.stale_groups {
        tracing::warn!(
            component = "scan",
            prefix = %group.origin.prefix,
            account_id = %group.origin.account_id,
            region = %group.origin.region,
            last_updated = %group.last_updated,
            "no recent CloudTrail activity for region"
        );
    }

    Ok(BucketScan {
        discovery,
        classification,
    })
}
