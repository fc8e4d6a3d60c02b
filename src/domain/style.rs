/// Style-level metadata for a single garment.
///
/// A tech pack holds exactly one `StyleInfo`. Front ends replace it wholesale
/// (see [`TechPack::set_style`](crate::TechPack::set_style)) rather than
/// editing individual fields in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleInfo {
    /// The style identifier, e.g. `ST-001`.
    pub style_number: String,
    /// The display name of the style, e.g. `Classic Tee`.
    pub style_name: String,
    /// The season the style belongs to, e.g. `FW26`.
    pub season: String,
    /// The brand the style is produced for.
    pub brand: String,
    /// The main body fabric.
    pub fabric: String,
    /// Trims in display order. May be empty.
    pub trims: Vec<String>,
}

impl StyleInfo {
    /// Returns the trims joined with `", "`, or `None` when there are none.
    #[must_use]
    pub fn trims_display(&self) -> Option<String> {
        if self.trims.is_empty() {
            None
        } else {
            Some(self.trims.join(", "))
        }
    }
}

/// Splits a comma-separated trims field into individual trims.
///
/// Each entry is trimmed of surrounding whitespace and blank entries are
/// dropped, so `"Neck rib, , Main label "` yields two trims.
#[must_use]
pub fn parse_trims(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|trim| !trim.is_empty())
        .map(ToString::to_string)
        .collect()
}
