use std::{fs::File, io, path::Path};

use serde::Serialize;
use tracing::instrument;

use super::ExportError;
use crate::{MeasurementSpec, TechPack};

const HEADER: [&str; 5] = ["pom", "size", "value", "tolerance", "notes"];

#[derive(Serialize)]
struct Row<'a> {
    pom: &'a str,
    size: &'a str,
    value: f64,
    tolerance: f64,
    notes: &'a str,
}

impl<'a> From<&'a MeasurementSpec> for Row<'a> {
    fn from(spec: &'a MeasurementSpec) -> Self {
        Self {
            pom: &spec.pom,
            size: &spec.size,
            value: spec.value,
            tolerance: spec.tolerance,
            notes: &spec.notes,
        }
    }
}

/// Writes the measurement table as CSV.
///
/// The header `pom,size,value,tolerance,notes` is always written, followed
/// by one record per measurement in order. Numbers keep their natural form
/// (`27.0`, `0.25`) rather than a fixed number of decimals. Records end
/// with `\r\n`.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_measurements<W: io::Write>(pack: &TechPack, writer: W) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    writer.write_record(HEADER)?;
    for spec in pack.measurements() {
        writer.serialize(Row::from(spec))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the measurement table as CSV to a file, replacing its content.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
#[instrument(level = "debug", skip(pack))]
pub fn write_measurements_to(pack: &TechPack, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_measurements(pack, file)?;
    tracing::debug!(rows = pack.measurements().len(), "exported measurements");
    Ok(())
}
