//! Domain models for tech pack management.
//!
//! This module contains the record types (style, measurement spec, revision),
//! the [`TechPack`] aggregate that owns them, and configuration.

mod config;
pub use config::Config;

/// Garment style metadata.
pub mod style;
pub use style::{StyleInfo, parse_trims};

/// Point-of-measure rows.
pub mod measurement;
pub use measurement::MeasurementSpec;

/// Revision history entries.
pub mod revision;
pub use revision::Revision;

mod starter;
pub use starter::starter_pack;

/// The tech pack aggregate.
pub mod tech_pack;
pub use tech_pack::{RemoveError, TechPack};

mod validation;
pub use validation::{IssueKind, ValidationIssue};
