use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Days, LocalResult, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::discovery::ActivityRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub cutoff: NaiveDateTime,
    /// Accounts where no region has activity at or after the cutoff.
    pub stale_accounts: BTreeSet<String>,
    /// Every origin older than the cutoff, whether or not its account is stale.
    pub stale_groups: Vec<ActivityRecord>,
}

impl ClassificationResult {
    pub fn has_stale_accounts(&self) -> bool {
        !self.stale_accounts.is_empty()
    }

    pub fn stale_regions_for<'a>(
        &'a self,
        account_id: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.stale_groups
            .iter()
            .filter(move |record| record.account_id() == account_id)
            .map(|record| record.origin.region.as_str())
    }
}

/// Midnight at the start of yesterday in `zone`, expressed as naive UTC.
///
/// This is a calendar boundary, not a rolling 24 hour window: at 00:30 the
/// cutoff is only 24.5 hours back, at 23:30 it is 47.5 hours back.
pub fn cutoff_for(now: DateTime<Utc>, zone: Tz) -> NaiveDateTime {
    let today = now.with_timezone(&zone).date_naive();
    let midnight = (today - Days::new(1)).and_time(NaiveTime::MIN);

    start_of_local(zone, midnight).naive_utc()
}

fn start_of_local(zone: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(value) => value,
        LocalResult::Ambiguous(earliest, _) => earliest,
        // Midnight skipped by a DST transition; the day starts at the first
        // valid instant after the gap.
        LocalResult::None => {
            let after_gap = local + TimeDelta::hours(1);
            zone.from_local_datetime(&after_gap)
                .earliest()
                .unwrap_or_else(|| zone.from_utc_datetime(&local))
        }
    }
}

/// Splits activity into stale accounts and stale origins relative to `cutoff`.
///
/// A record exactly at the cutoff is fresh.
pub fn classify(records: &[ActivityRecord], cutoff: NaiveDateTime) -> ClassificationResult {
    let stale_groups: Vec<ActivityRecord> = records
        .iter()
        .filter(|record| record.last_updated < cutoff)
        .cloned()
        .collect();

    let mut account_latest: BTreeMap<&str, NaiveDateTime> = BTreeMap::new();
    for record in records {
        account_latest
            .entry(record.account_id())
            .and_modify(|latest| *latest = (*latest).max(record.last_updated))
            .or_insert(record.last_updated);
    }

    let stale_accounts = account_latest
        .into_iter()
        .filter(|(_, latest)| *latest < cutoff)
        .map(|(account_id, _)| account_id.to_string())
        .collect();

    ClassificationResult {
        cutoff,
        stale_accounts,
        stale_groups,
    }
}
