use std::{collections::HashSet, fmt};

use crate::MeasurementSpec;

/// The rule a measurement row broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// The measurement is zero or negative.
    NonPositiveValue,
    /// The tolerance is negative.
    NegativeTolerance,
    /// An earlier row already uses the same POM and size.
    DuplicateKey,
}

impl IssueKind {
    /// The human-readable description of the rule.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NonPositiveValue => "measurement must be > 0",
            Self::NegativeTolerance => "tolerance must be >= 0",
            Self::DuplicateKey => "duplicate POM + size combination",
        }
    }
}

/// A single problem found in the measurement table.
///
/// Validation issues are data for the caller to report, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The 1-based position of the offending row.
    pub row: usize,
    /// The POM of the offending row, as entered.
    pub pom: String,
    /// The size of the offending row, as entered.
    pub size: String,
    /// Which rule was broken.
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} ({} / {}): {}",
            self.row,
            self.pom,
            self.size,
            self.kind.message()
        )
    }
}

/// Checks every row in order, then flags repeats of an already-seen key.
///
/// Only the second and later occurrences of a key are reported as
/// duplicates.
pub(crate) fn validate_measurements(measurements: &[MeasurementSpec]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (idx, spec) in measurements.iter().enumerate() {
        let issue = |kind: IssueKind| ValidationIssue {
            row: idx + 1,
            pom: spec.pom.clone(),
            size: spec.size.clone(),
            kind,
        };

        if spec.value <= 0.0 {
            issues.push(issue(IssueKind::NonPositiveValue));
        }
        if spec.tolerance < 0.0 {
            issues.push(issue(IssueKind::NegativeTolerance));
        }
        if !seen.insert(spec.key()) {
            issues.push(issue(IssueKind::DuplicateKey));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn spec(pom: &str, size: &str, value: f64, tolerance: f64) -> MeasurementSpec {
        MeasurementSpec::new(pom, size, value, tolerance)
    }

    #[test]
    fn empty_table_is_valid() {
        assert!(validate_measurements(&[]).is_empty());
    }

    #[test]
    fn positive_unique_rows_are_valid() {
        let rows = [
            spec("Chest", "S", 19.0, 0.25),
            spec("Chest", "M", 20.0, 0.25),
            spec("Body Length (HPS)", "M", 27.0, 0.0),
        ];
        assert!(validate_measurements(&rows).is_empty());
    }

    #[test_case(0.0, 0.25, &[IssueKind::NonPositiveValue]; "zero value")]
    #[test_case(-1.0, 0.25, &[IssueKind::NonPositiveValue]; "negative value")]
    #[test_case(20.0, -0.5, &[IssueKind::NegativeTolerance]; "negative tolerance")]
    #[test_case(-1.0, -0.5, &[IssueKind::NonPositiveValue, IssueKind::NegativeTolerance]; "both")]
    #[test_case(0.01, 0.0, &[]; "smallest valid")]
    fn single_row_rules(value: f64, tolerance: f64, expected: &[IssueKind]) {
        let issues = validate_measurements(&[spec("Chest", "M", value, tolerance)]);
        let kinds: Vec<_> = issues.iter().map(|issue| issue.kind).collect();
        assert_eq!(kinds, expected);
    }

    #[test]
    fn only_repeats_of_a_key_are_flagged() {
        let rows = [
            spec("Chest", "M", 20.0, 0.25),
            spec("Waist", "M", 18.0, 0.25),
            spec(" chest", "m ", 20.0, 0.25),
            spec("CHEST", "M", 20.0, 0.25),
        ];
        let issues = validate_measurements(&rows);

        let rows: Vec<_> = issues.iter().map(|issue| issue.row).collect();
        assert_eq!(rows, [3, 4]);
        assert!(issues.iter().all(|issue| issue.kind == IssueKind::DuplicateKey));
    }

    #[test]
    fn one_duplicate_issue_per_repeat() {
        let poms = ["Chest", "Waist", "Hip", "Sleeve"];
        let sizes = ["S", "M"];

        // Walk a deterministic sequence that revisits keys many times.
        let rows: Vec<_> = (0..50)
            .map(|i| spec(poms[(i * 7) % 4], sizes[(i * 3) % 2], 10.0, 0.25))
            .collect();
        let distinct: HashSet<_> = rows.iter().map(MeasurementSpec::key).collect();

        let issues = validate_measurements(&rows);

        assert_eq!(issues.len(), rows.len() - distinct.len());
        for issue in &issues {
            let first = rows
                .iter()
                .position(|row| row.key() == rows[issue.row - 1].key())
                .unwrap();
            assert!(first < issue.row - 1, "first occurrence flagged at row {}", issue.row);
        }
    }

    #[test]
    fn invalid_first_occurrence_still_registers_its_key() {
        let rows = [spec("Chest", "M", -1.0, 0.25), spec("Chest", "M", 20.0, 0.25)];
        let issues = validate_measurements(&rows);

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].kind, IssueKind::NonPositiveValue);
        assert_eq!(issues[1].kind, IssueKind::DuplicateKey);
        assert_eq!(issues[1].row, 2);
    }

    #[test]
    fn issue_names_row_pom_and_size() {
        let issues = validate_measurements(&[spec("Chest", "M", 0.0, 0.25)]);
        assert_eq!(
            issues[0].to_string(),
            "row 1 (Chest / M): measurement must be > 0"
        );
    }
}
