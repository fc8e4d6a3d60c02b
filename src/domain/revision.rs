use chrono::{SecondsFormat, Utc};

/// One entry in a tech pack's revision history.
///
/// Revisions are append-only: a [`TechPack`](crate::TechPack) offers no way
/// to edit or delete them once added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    /// The version label, e.g. `v2`.
    pub version: String,
    /// Who made the change.
    pub author: String,
    /// What changed.
    pub summary: String,
    /// When the change was recorded, as an ISO-8601 UTC timestamp.
    pub timestamp: String,
}

impl Revision {
    /// Creates a revision.
    ///
    /// When `timestamp` is `None` the current UTC instant is used, read at
    /// the time of the call.
    #[must_use]
    pub fn new(
        version: impl Into<String>,
        author: impl Into<String>,
        summary: impl Into<String>,
        timestamp: Option<String>,
    ) -> Self {
        Self {
            version: version.into(),
            author: author.into(),
            summary: summary.into(),
            timestamp: timestamp.unwrap_or_else(now_timestamp),
        }
    }
}

/// The current UTC instant, e.g. `2026-10-18T09:30:00.123456+00:00`.
#[must_use]
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}
