//! Audit trail
//!
//! Every create, update and delete performed by the services is appended to
//! `audit.log` as one JSON line carrying before/after snapshots.
//!
//! - `AuditEntry`: one operation on one entity
//! - `AuditLogger`: JSONL writer/reader
//! - `generate_diff`: field-level change summary used for updates

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
