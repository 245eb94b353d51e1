use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::origin::{parse_origin, OriginDescriptor};

/// Floor every origin starts from before its first object is seen: the UNIX epoch.
pub fn long_time_ago() -> NaiveDateTime {
    NaiveDateTime::default()
}

/// One object as reported by the bucket listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedObject {
    pub key: String,
    pub last_modified: DateTime<Utc>,
}

impl ListedObject {
    pub fn new(key: impl Into<String>, last_modified: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            last_modified,
        }
    }
}

/// Most recent upload observed for one origin in a single scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(flatten)]
    pub origin: OriginDescriptor,
    pub last_updated: NaiveDateTime,
}

impl ActivityRecord {
    pub fn account_id(&self) -> &str {
        &self.origin.account_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Discovery {
    pub records: Vec<ActivityRecord>,
    pub objects_scanned: usize,
    pub objects_skipped: usize,
}

/// Strips the zone from a UTC timestamp so it can be compared with the cutoff.
pub fn normalize_utc(timestamp: DateTime<Utc>) -> NaiveDateTime {
    timestamp.naive_utc()
}

/// Reduces a complete bucket listing to one [`ActivityRecord`] per origin.
///
/// Objects whose key is not a CloudTrail key are counted in
/// `objects_skipped` and otherwise ignored. Records come back ordered by
/// origin regardless of listing order.
pub fn discover_activity(objects: impl IntoIterator<Item = ListedObject>) -> Discovery {
    let mut last_seen: BTreeMap<OriginDescriptor, NaiveDateTime> = BTreeMap::new();
    let mut objects_scanned = 0usize;
    let mut objects_skipped = 0usize;

    for object in objects {
        objects_scanned += 1;
        let Ok(origin) = parse_origin(&object.key) else {
            objects_skipped += 1;
            continue;
        };

        let last_modified = normalize_utc(object.last_modified);
        let entry = last_seen.entry(origin).or_insert_with(long_time_ago);
        if *entry < last_modified {
            *entry = last_modified;
        }
    }

    let records = last_seen
        .into_iter()
        .map(|(origin, last_updated)| ActivityRecord {
            origin,
            last_updated,
        })
        .collect();

    Discovery {
        records,
        objects_scanned,
        objects_skipped,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, hour, 15, 0)
            .single()
            .expect("valid timestamp")
    }

    fn key(account_id: &str, region: &str, name: &str) -> String {
        format!("someprefix/AWSLogs/{account_id}/CloudTrail/{region}/2026/10/16/{name}.json.gz")
    }

    #[test]
    fn keeps_latest_timestamp_per_origin() {
        let discovery = discover_activity(vec![
            ListedObject::new(key("11111111111", "ap-northeast-1", "a"), at(3)),
            ListedObject::new(key("11111111111", "ap-northeast-1", "b"), at(9)),
            ListedObject::new("some-other-object-not-from-cloudtrail", at(12)),
        ]);

        assert_eq!(discovery.objects_scanned, 3);
        assert_eq!(discovery.objects_skipped, 1);
        assert_eq!(
            discovery.records,
            vec![ActivityRecord {
                origin: OriginDescriptor::new("someprefix", "11111111111", "ap-northeast-1"),
                last_updated: at(9).naive_utc(),
            }]
        );
    }

    #[test]
    fn grouping_ignores_listing_order() {
        let objects = vec![
            ListedObject::new(key("22222222222", "eu-west-1", "a"), at(1)),
            ListedObject::new(key("11111111111", "eu-west-1", "b"), at(5)),
            ListedObject::new(key("22222222222", "eu-west-1", "c"), at(7)),
            ListedObject::new(key("22222222222", "us-west-2", "d"), at(2)),
        ];
        let mut reversed = objects.clone();
        reversed.reverse();

        let forward = discover_activity(objects);
        let backward = discover_activity(reversed);

        assert_eq!(forward, backward);
        assert_eq!(forward.records.len(), 3);
        assert_eq!(forward.records[1].last_updated, at(7).naive_utc());
    }

    #[test]
    fn distinct_prefixes_are_distinct_origins() {
        let discovery = discover_activity(vec![
            ListedObject::new(
                "tenant-a/AWSLogs/111/CloudTrail/eu-west-1/2026/10/16/x.json.gz",
                at(1),
            ),
            ListedObject::new(
                "tenant-b/AWSLogs/111/CloudTrail/eu-west-1/2026/10/16/x.json.gz",
                at(1),
            ),
        ]);

        let prefixes: Vec<&str> = discovery
            .records
            .iter()
            .map(|record| record.origin.prefix.as_str())
            .collect();
        assert_eq!(prefixes, vec!["tenant-a", "tenant-b"]);
    }

    #[test]
    fn floor_is_the_unix_epoch() {
        assert_eq!(long_time_ago().and_utc().timestamp(), 0);
    }

    #[test]
    fn empty_listing_yields_no_records() {
        let discovery = discover_activity(Vec::new());
        assert_eq!(discovery, Discovery::default());
    }

    #[test]
    fn normalization_keeps_the_utc_wall_clock() {
        let timestamp = at(23) + Duration::minutes(44);
        let normalized = normalize_utc(timestamp);
        assert_eq!(normalized.to_string(), "2026-10-16 23:59:00");
    }

    #[test]
    fn serializes_records_with_flattened_origin() {
        let record = ActivityRecord {
            origin: OriginDescriptor::new("p", "111", "eu-west-1"),
            last_updated: at(4).naive_utc(),
        };

        let value = serde_json::to_value(&record).expect("record should serialize");
        assert_eq!(value["prefix"], "p");
        assert_eq!(value["account_id"], "111");
        assert_eq!(value["region"], "eu-west-1");
        assert_eq!(value["last_updated"], "2026-10-16T04:15:00");
    }
}
