//! Snapshot export/import for contract graphs.
//!
//! Provides the portable serialized form of a [`ContractGraph`]
//! (versionless JSON, forward-tolerant of unknown keys) and the lenient
//! reader that degrades gracefully on partially corrupt documents.
//!
//! # Modules
//!
//! - [`error`]: the one hard failure mode (unreadable document)
//! - [`snapshot`]: format types, export, lenient parse, import

pub mod error;
pub mod snapshot;

pub use error::SnapshotError;
pub use snapshot::{export_graph, import_graph, parse_snapshot, Snapshot, SnapshotEntry};
