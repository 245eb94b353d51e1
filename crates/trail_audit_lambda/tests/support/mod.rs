#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use trail_audit_lambda::adapters::notifier::AlertPublisher;
use trail_audit_lambda::adapters::object_listing::ObjectLister;
use trail_audit_lambda::runtime::alert::AlertMessage;
use trail_audit_lambda::runtime::discovery::ListedObject;

pub const TOPIC_ARN: &str = "arn:aws:sns:eu-west-1:123456789012:cloudtrail-alerts";

/// Fixed "now" used by every scenario: mid-morning UTC.
pub fn today() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 10, 45, 0)
        .single()
        .expect("valid timestamp")
}

pub fn two_days_ago() -> DateTime<Utc> {
    today() - Duration::days(2)
}

/// Bucket shaped like a real multi-account trail: two accounts, four
/// region groups, and one object that has nothing to do with CloudTrail.
pub fn mixed_bucket_objects() -> Vec<ListedObject> {
    vec![
        ListedObject::new(
            "someprefix/AWSLogs/11111111111/CloudTrail/ap-northeast-1/2016/12/12/123123_CloudTrail_ap-northeast-1_20161212T1630Z_z9wBpTAjoz3GfFol.json.gz",
            two_days_ago(),
        ),
        ListedObject::new(
            "someprefix/AWSLogs/11111111111/CloudTrail/ap-northeast-1/2016/12/13/123123_CloudTrail_ap-northeast-1_20161213T1120Z_uqvFwTOgY7k0HJ7G.json.gz",
            two_days_ago(),
        ),
        ListedObject::new(
            "someprefix/AWSLogs/11111111111/CloudTrail/eu-west-1/2016/12/12/123123_CloudTrail_eu-west-1_20161212T1625Z_gd8pgknS82gmbng9.json.gz",
            two_days_ago(),
        ),
        ListedObject::new(
            "someprefix/AWSLogs/22222222222/CloudTrail/eu-west-1/2016/12/12/123123_CloudTrail_eu-west-1_20161212T1640Z_MiWtmqdhtb9tMvVL.json.gz",
            two_days_ago(),
        ),
        ListedObject::new(
            "someprefix/AWSLogs/22222222222/CloudTrail/us-west-2/2016/12/13/123123_CloudTrail_us-west-2_20161213T1120Z_oWwWCNoFKyilEqjz.json.gz",
            today(),
        ),
        ListedObject::new("some-other-object-not-from-cloudtrail", two_days_ago()),
    ]
}

pub fn fresh_bucket_objects() -> Vec<ListedObject> {
    vec![
        ListedObject::new(
            "someprefix/AWSLogs/11111111111/CloudTrail/eu-west-1/2026/10/18/a.json.gz",
            today(),
        ),
        ListedObject::new(
            "someprefix/AWSLogs/22222222222/CloudTrail/us-west-2/2026/10/18/b.json.gz",
            today() - Duration::hours(3),
        ),
    ]
}

pub struct FakeBucket {
    objects: Vec<ListedObject>,
    calls: AtomicUsize,
}

impl FakeBucket {
    pub fn new(objects: Vec<ListedObject>) -> Self {
        Self {
            objects,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ObjectLister for FakeBucket {
    fn list_objects(&self, _bucket: &str) -> Result<Vec<ListedObject>, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.objects.clone())
    }
}

pub struct FailingLister;

impl ObjectLister for FailingLister {
    fn list_objects(&self, _bucket: &str) -> Result<Vec<ListedObject>, String> {
        Err("NoSuchBucket: The specified bucket does not exist".to_string())
    }
}

pub struct CapturingPublisher {
    messages: Mutex<Vec<(String, AlertMessage)>>,
}

impl CapturingPublisher {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<(String, AlertMessage)> {
        self.messages.lock().expect("poisoned mutex").clone()
    }
}

impl AlertPublisher for CapturingPublisher {
    fn publish(&self, destination: &str, message: &AlertMessage) -> Result<String, String> {
        let mut messages = self.messages.lock().expect("poisoned mutex");
        messages.push((destination.to_string(), message.clone()));
        Ok(format!("message-{}", messages.len()))
    }
}

pub struct FailingPublisher;

impl AlertPublisher for FailingPublisher {
    fn publish(&self, _destination: &str, _message: &AlertMessage) -> Result<String, String> {
        Err("AuthorizationError: not allowed to publish".to_string())
    }
}
