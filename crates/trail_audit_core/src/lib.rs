//! Shared CloudTrail freshness audit primitives.
//!
//! This crate owns key parsing, activity aggregation, staleness classification
//! and alert formatting. It intentionally excludes AWS SDK and Lambda runtime
//! concerns so every rule here can be exercised with plain values.

pub mod alert;
pub mod discovery;
pub mod origin;
pub mod staleness;
