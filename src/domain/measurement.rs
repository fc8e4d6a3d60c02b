/// A single point-of-measure (POM) row in the measurement table.
///
/// Construction never validates. Non-positive values, negative tolerances
/// and duplicate POM/size pairs are accepted here and reported by
/// [`TechPack::validate`](crate::TechPack::validate).
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSpec {
    /// The name of the measured point, e.g. `Body Length (HPS)`.
    pub pom: String,
    /// The size label, e.g. `M`.
    pub size: String,
    /// The specified measurement.
    pub value: f64,
    /// The permitted deviation either side of `value`.
    pub tolerance: f64,
    /// Free-form measuring instructions. Empty when there are none.
    pub notes: String,
}

impl MeasurementSpec {
    /// Creates a measurement row with no notes.
    #[must_use]
    pub fn new(pom: impl Into<String>, size: impl Into<String>, value: f64, tolerance: f64) -> Self {
        Self {
            pom: pom.into(),
            size: size.into(),
            value,
            tolerance,
            notes: String::new(),
        }
    }

    /// Sets the notes for this row.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// The key used to detect duplicate rows.
    ///
    /// POM and size are trimmed and lowercased, so `" Chest"`/`"m"` and
    /// `"chest"`/`"M "` collide.
    #[must_use]
    pub fn key(&self) -> (String, String) {
        (
            self.pom.trim().to_lowercase(),
            self.size.trim().to_lowercase(),
        )
    }
}
