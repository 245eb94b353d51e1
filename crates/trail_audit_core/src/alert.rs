use std::collections::BTreeSet;
use std::fmt::Write as _;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::discovery::{ActivityRecord, Discovery};
use crate::staleness::ClassificationResult;

pub const STALE_ACCOUNT_SUBJECT: &str = "Accounts found with no CloudTrail activity";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
}

/// Builds the operator alert for stale accounts, or `None` when all are current.
///
/// Region-level findings are not part of the alert.
pub fn stale_account_alert(result: &ClassificationResult) -> Option<AlertMessage> {
    if !result.has_stale_accounts() {
        return None;
    }

    let mut body = format!(
        "The following accounts appear to have no CloudTrail activity since {} UTC:\n",
        result.cutoff.format("%Y-%m-%d %H:%M")
    );
    for account_id in &result.stale_accounts {
        // Writing to a String cannot fail.
        let _ = writeln!(body, "- {account_id}");
    }

    Some(AlertMessage {
        subject: STALE_ACCOUNT_SUBJECT.to_string(),
        body,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    AllCurrent,
    StaleAccountsFound,
}

/// Outcome of one audit run, as returned by the Lambda and the JSON CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub status: AuditStatus,
    pub cutoff: NaiveDateTime,
    pub objects_scanned: usize,
    pub objects_skipped: usize,
    pub origins_discovered: usize,
    pub stale_accounts: BTreeSet<String>,
    pub stale_groups: Vec<ActivityRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<String>,
}

impl AuditSummary {
    pub fn new(discovery: &Discovery, result: ClassificationResult) -> Self {
        let status = if result.has_stale_accounts() {
            AuditStatus::StaleAccountsFound
        } else {
            AuditStatus::AllCurrent
        };

        Self {
            status,
            cutoff: result.cutoff,
            objects_scanned: discovery.objects_scanned,
            objects_skipped: discovery.objects_skipped,
            origins_discovered: discovery.records.len(),
            stale_accounts: result.stale_accounts,
            stale_groups: result.stale_groups,
            notification_id: None,
        }
    }

    pub fn with_notification_id(mut self, notification_id: impl Into<String>) -> Self {
        self.notification_id = Some(notification_id.into());
        self
    }
}
