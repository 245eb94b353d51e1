//! Re-exports of the domain primitives handlers are built on.

pub use trail_audit_core::{alert, discovery, origin, staleness};
