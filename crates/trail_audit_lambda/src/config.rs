use chrono_tz::Tz;

use crate::error::AuditError;

pub const BUCKET_NAME_VAR: &str = "BUCKET_NAME";
pub const TOPIC_ARN_VAR: &str = "TOPIC_ARN";
pub const TIMEZONE_VAR: &str = "AUDIT_TIMEZONE";
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Settings for the scheduled audit, read once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    pub bucket: String,
    pub topic_arn: String,
    pub time_zone: Tz,
}

impl AuditConfig {
    pub fn from_env() -> Result<Self, AuditError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AuditError> {
        let bucket = required(&lookup, BUCKET_NAME_VAR)?;
        let topic_arn = required(&lookup, TOPIC_ARN_VAR)?;
        validate_topic_arn(&topic_arn)?;

        let time_zone = match lookup(TIMEZONE_VAR) {
            Some(value) if !value.trim().is_empty() => parse_time_zone(&value)?,
            _ => Tz::UTC,
        };

        Ok(Self {
            bucket,
            topic_arn,
            time_zone,
        })
    }
}

pub fn parse_time_zone(name: &str) -> Result<Tz, AuditError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| AuditError::InvalidTimeZone(name.to_string()))
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, AuditError> {
    let value = lookup(key).ok_or(AuditError::ConfigurationMissing(key))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuditError::ConfigurationInvalid {
            key,
            message: "value cannot be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

// arn:<partition>:sns:<region>:<account>:<topic>
fn validate_topic_arn(arn: &str) -> Result<(), AuditError> {
    let parts: Vec<&str> = arn.splitn(6, ':').collect();
    let well_formed = parts.len() == 6
        && parts[0] == "arn"
        && parts[2] == "sns"
        && !parts[5].is_empty();

    if well_formed {
        Ok(())
    } else {
        Err(AuditError::ConfigurationInvalid {
            key: TOPIC_ARN_VAR,
            message: format!("'{arn}' is not an SNS topic ARN"),
        })
    }
}
