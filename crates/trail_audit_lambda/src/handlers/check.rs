use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::ValueEnum;

use crate::adapters::object_listing::ObjectLister;
use crate::error::AuditError;
use crate::handlers::scan::scan_bucket;
use crate::runtime::alert::AuditSummary;

pub const EXIT_ALL_CURRENT: u8 = 0;
pub const EXIT_STALE_ACCOUNTS: u8 = 1;
pub const EXIT_FAILURE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Stale account ids, one per line
    Text,
    /// Full audit summary as JSON
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    pub bucket: String,
    pub time_zone: Tz,
    pub format: OutputFormat,
    pub show_regions: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub exit_code: u8,
    pub output: String,
}

/// One-off check from the command line. Never notifies.
pub fn run_check(
    options: &CheckOptions,
    now: DateTime<Utc>,
    lister: &dyn ObjectLister,
) -> Result<CheckReport, AuditError> {
    let scan = scan_bucket(&options.bucket, options.time_zone, now, lister)?;
    let summary = scan.summary();

    let exit_code = if summary.stale_accounts.is_empty() {
        EXIT_ALL_CURRENT
    } else {
        EXIT_STALE_ACCOUNTS
    };

    let output = match options.format {
        OutputFormat::Text => render_text(&summary, options.show_regions),
        OutputFormat::Json => render_json(&summary),
    };

    Ok(CheckReport { exit_code, output })
}

fn render_text(summary: &AuditSummary, show_regions: bool) -> String {
    let mut output = String::new();
    for account_id in &summary.stale_accounts {
        let _ = writeln!(output, "{account_id}");
    }

    if show_regions && !summary.stale_groups.is_empty() {
        let _ = writeln!(output, "stale regions (no activity since {}):", summary.cutoff);
        for group in &summary.stale_groups {
            let _ = writeln!(
                output,
                "  {}  last updated {}",
                group.origin, group.last_updated
            );
        }
    }

    output
}

fn render_json(summary: &AuditSummary) -> String {
    match serde_json::to_string_pretty(summary) {
        Ok(mut json) => {
            json.push('\n');
            json
        }
        Err(error) => format!("{{\"error\": \"failed to serialize summary: {error}\"}}\n"),
    }
}
