//! Human-readable and tabular renderings of a tech pack.

/// CSV export of the measurement table.
pub mod csv;
/// Markdown report export.
pub mod markdown;

/// Errors that can occur when writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The output could not be written.
    #[error("failed to write export")]
    Io(#[from] std::io::Error),
    /// A CSV record could not be written.
    #[error("failed to write CSV")]
    Csv(#[from] ::csv::Error),
}
