//! AWS-oriented adapters and handlers for the CloudTrail freshness audit.
//!
//! This crate owns runtime integration details (Lambda and CLI handlers,
//! S3 listing and SNS publishing adapters, configuration and tracing setup)
//! and exposes a single runtime module boundary for the key parsing,
//! discovery, staleness and alert primitives.

pub mod adapters;
pub mod config;
pub mod error;
pub mod handlers;
pub mod runtime;
pub mod telemetry;
