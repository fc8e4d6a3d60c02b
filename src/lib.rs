//! Plain-text Tech Pack Management
//!
//! A tech pack is a garment specification: style metadata, a table of
//! measurement specs and a revision history. Packs are stored as JSON and
//! exported to Markdown and CSV.

pub mod domain;
pub use domain::{
    Config, IssueKind, MeasurementSpec, RemoveError, Revision, StyleInfo, TechPack,
    ValidationIssue, parse_trims, starter_pack,
};

/// JSON persistence for tech packs.
pub mod storage;
pub use storage::{LoadError, SaveError};

/// Markdown and CSV renderings of a tech pack.
pub mod export;
pub use export::ExportError;
