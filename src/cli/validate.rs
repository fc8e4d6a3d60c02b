use std::{path::PathBuf, process};

use clap::Parser;
use techpack::{TechPack, ValidationIssue};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Validate tech pack measurement data")]
pub struct Validate {
    /// Existing tech pack JSON path
    #[arg(long, default_value = super::DEFAULT_FILE)]
    file: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Validate {
    #[instrument(level = "debug", skip(self), fields(file = %self.file.display()))]
    pub fn run(self) -> anyhow::Result<()> {
        let pack = TechPack::load(&self.file)?;
        let issues = pack.validate();
        tracing::info!(issues = issues.len(), "validated tech pack");

        match self.output {
            OutputFormat::Text => println!("{}", render_text(&issues)),
            OutputFormat::Json => println!("{}", render_json(&issues)?),
        }

        match exit_code(&issues) {
            0 => Ok(()),
            code => process::exit(code),
        }
    }
}

/// The process exit status for a validation run: 1 when any issue was
/// found.
const fn exit_code(issues: &[ValidationIssue]) -> i32 {
    if issues.is_empty() { 0 } else { 1 }
}

pub(super) fn render_text(issues: &[ValidationIssue]) -> String {
    if issues.is_empty() {
        return "Tech pack validation passed".success();
    }

    let mut lines = vec!["Validation issues found:".warning()];
    lines.extend(issues.iter().map(|issue| format!("- {issue}")));
    lines.join("\n")
}

fn render_json(issues: &[ValidationIssue]) -> serde_json::Result<String> {
    let issues: Vec<_> = issues
        .iter()
        .map(|issue| {
            serde_json::json!({
                "row": issue.row,
                "pom": issue.pom,
                "size": issue.size,
                "message": issue.kind.message(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&issues)
}

#[cfg(test)]
mod tests {
    use techpack::{MeasurementSpec, starter_pack};

    use super::*;

    fn broken_pack() -> TechPack {
        let mut pack = starter_pack();
        pack.add_measurement(MeasurementSpec::new("Chest", "M", -1.0, -0.5));
        pack.add_measurement(MeasurementSpec::new("Chest", "M", 20.0, 0.25));
        pack
    }

    #[test]
    fn text_lists_each_issue() {
        let text = render_text(&broken_pack().validate());

        assert!(text.contains("Validation issues found:"));
        assert!(text.contains("- row 2 (Chest / M): measurement must be > 0"));
        assert!(text.contains("- row 2 (Chest / M): tolerance must be >= 0"));
        assert!(text.contains("- row 3 (Chest / M): duplicate POM + size combination"));
    }

    #[test]
    fn exit_code_is_non_zero_only_when_issues_exist() {
        assert_eq!(exit_code(&starter_pack().validate()), 0);
        assert_eq!(exit_code(&broken_pack().validate()), 1);
    }

    #[test]
    fn text_reports_success() {
        assert!(render_text(&starter_pack().validate()).contains("Tech pack validation passed"));
    }

    #[test]
    fn json_lists_each_issue() {
        let json = render_json(&broken_pack().validate()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let issues = value.as_array().unwrap();
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[2]["row"], 3);
        assert_eq!(issues[2]["message"], "duplicate POM + size combination");
    }
}
