use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Path segment CloudTrail writes between the tenant prefix and the account id.
pub const LOGS_MARKER: &str = "AWSLogs";
/// Path segment CloudTrail writes between the account id and the region.
pub const SERVICE_MARKER: &str = "CloudTrail";

static ORIGIN_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<prefix>[\w,\-]+)/AWSLogs/(?P<account_id>[0-9]+)/CloudTrail/(?P<region>[0-9a-z,\-]+)/",
    )
    .expect("origin key pattern is a valid regex")
});

/// Where a CloudTrail log object came from, recovered from its object key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OriginDescriptor {
    pub prefix: String,
    pub account_id: String,
    pub region: String,
}

impl OriginDescriptor {
    pub fn new(
        prefix: impl Into<String>,
        account_id: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            account_id: account_id.into(),
            region: region.into(),
        }
    }

    /// Key prefix under which CloudTrail stores this origin's objects.
    pub fn key_prefix(&self) -> String {
        format!(
            "{}/{LOGS_MARKER}/{}/{SERVICE_MARKER}/{}/",
            self.prefix, self.account_id, self.region
        )
    }
}

impl fmt::Display for OriginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.prefix, self.account_id, self.region)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("object key '{key}' does not follow the CloudTrail naming convention")]
pub struct KeyParseMismatch {
    pub key: String,
}

/// Parses `<prefix>/AWSLogs/<account_id>/CloudTrail/<region>/<suffix>`.
///
/// Keys of unrelated objects yield [`KeyParseMismatch`]; whether that is fatal
/// is up to the caller.
pub fn parse_origin(key: &str) -> Result<OriginDescriptor, KeyParseMismatch> {
    let captures = ORIGIN_KEY_PATTERN
        .captures(key)
        .ok_or_else(|| KeyParseMismatch {
            key: key.to_string(),
        })?;

    Ok(OriginDescriptor::new(
        &captures["prefix"],
        &captures["account_id"],
        &captures["region"],
    ))
}

impl FromStr for OriginDescriptor {
    type Err = KeyParseMismatch;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        parse_origin(key)
    }
}
