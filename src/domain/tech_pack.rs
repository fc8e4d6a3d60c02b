use std::path::Path;

use crate::{
    ExportError, LoadError, MeasurementSpec, Revision, SaveError, StyleInfo, ValidationIssue,
    domain::validation::validate_measurements, export, storage,
};

/// A garment tech pack: style metadata, measurement specs and revisions.
///
/// Measurements and revisions are kept in insertion order, which is also
/// the order they are displayed and exported in. Revisions are oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct TechPack {
    /// The style this pack describes.
    ///
    /// Replace it as a whole; there is no partial update.
    pub style: StyleInfo,
    measurements: Vec<MeasurementSpec>,
    revisions: Vec<Revision>,
}

impl TechPack {
    /// Creates an empty tech pack for the given style.
    #[must_use]
    pub const fn new(style: StyleInfo) -> Self {
        Self {
            style,
            measurements: Vec::new(),
            revisions: Vec::new(),
        }
    }

    /// Creates a tech pack from its parts, keeping the given order.
    #[must_use]
    pub const fn from_parts(
        style: StyleInfo,
        measurements: Vec<MeasurementSpec>,
        revisions: Vec<Revision>,
    ) -> Self {
        Self {
            style,
            measurements,
            revisions,
        }
    }

    /// The style metadata.
    #[must_use]
    pub const fn style(&self) -> &StyleInfo {
        &self.style
    }

    /// Replaces the style metadata.
    pub fn set_style(&mut self, style: StyleInfo) {
        self.style = style;
    }

    /// The measurement rows, in insertion order.
    #[must_use]
    pub fn measurements(&self) -> &[MeasurementSpec] {
        &self.measurements
    }

    /// The revision history, oldest first.
    #[must_use]
    pub fn revisions(&self) -> &[Revision] {
        &self.revisions
    }

    /// Appends a measurement row.
    ///
    /// The row is not checked; invalid values and duplicate POM/size pairs
    /// are accepted and show up in [`Self::validate`].
    pub fn add_measurement(&mut self, measurement: MeasurementSpec) {
        self.measurements.push(measurement);
    }

    /// Appends a revision to the history.
    pub fn add_revision(&mut self, revision: Revision) {
        self.revisions.push(revision);
    }

    /// Removes the measurement row at `index` (0-based) and returns it.
    ///
    /// Later rows shift down by one.
    ///
    /// # Errors
    ///
    /// Returns [`RemoveError::OutOfRange`] if there is no row at `index`.
    pub fn remove_measurement(&mut self, index: usize) -> Result<MeasurementSpec, RemoveError> {
        let len = self.measurements.len();
        if index >= len {
            return Err(RemoveError::OutOfRange { index, len });
        }
        Ok(self.measurements.remove(index))
    }

    /// Checks the measurement table and returns one issue per violation.
    ///
    /// An empty list means the pack is valid. Style and revisions are not
    /// checked.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_measurements(&self.measurements)
    }

    /// Reads a tech pack from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a
    /// tech pack.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        storage::load(path)
    }

    /// Writes the tech pack to a JSON file, replacing its content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), SaveError> {
        storage::save(self, path)
    }

    /// Renders the tech pack as a Markdown report.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        export::markdown::render(self)
    }

    /// Writes the measurement table to a CSV file, replacing its content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn export_measurements_csv(&self, path: &Path) -> Result<(), ExportError> {
        export::csv::write_measurements_to(self, path)
    }
}

/// Error returned when removing a measurement row that does not exist.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RemoveError {
    /// The index does not refer to an existing row.
    #[error("no measurement at index {index} (pack has {len} rows)")]
    OutOfRange {
        /// The requested 0-based index.
        index: usize,
        /// The number of rows in the pack.
        len: usize,
    },
}
