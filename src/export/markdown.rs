use crate::TechPack;

const NO_SPECS_ROW: &str = "| _No specs yet_ |  |  |  |  |";
const NO_REVISIONS_ROW: &str = "| _No revisions yet_ |  |  |  |";

/// Renders a tech pack as a Markdown report.
///
/// The report has a title, a style details list, a measurement table and a
/// revision table. Empty tables get a placeholder row. Output depends only on
/// the pack, so rendering an unchanged pack twice gives identical text.
#[must_use]
pub fn render(pack: &TechPack) -> String {
    let style = pack.style();
    let trims = style.trims_display();

    let mut lines = vec![
        format!("# Tech Pack - {}", style.style_name),
        String::new(),
        "## Style Details".to_string(),
        String::new(),
        format!("- **Style Number:** {}", style.style_number),
        format!("- **Season:** {}", style.season),
        format!("- **Brand:** {}", style.brand),
        format!("- **Fabric:** {}", style.fabric),
        format!("- **Trims:** {}", trims.as_deref().unwrap_or("None")),
        String::new(),
        "## Measurement Specs".to_string(),
        String::new(),
        "| POM | Size | Measurement | Tolerance | Notes |".to_string(),
        "| --- | --- | ---: | ---: | --- |".to_string(),
    ];
    lines.extend(pack.measurements().iter().map(|spec| {
        format!(
            "| {} | {} | {:.2} | ±{:.2} | {} |",
            spec.pom, spec.size, spec.value, spec.tolerance, spec.notes
        )
    }));
    if pack.measurements().is_empty() {
        lines.push(NO_SPECS_ROW.to_string());
    }

    lines.extend([
        String::new(),
        "## Revision History".to_string(),
        String::new(),
        "| Version | Timestamp (UTC) | Author | Summary |".to_string(),
        "| --- | --- | --- | --- |".to_string(),
    ]);
    lines.extend(pack.revisions().iter().map(|revision| {
        format!(
            "| {} | {} | {} | {} |",
            revision.version, revision.timestamp, revision.author, revision.summary
        )
    }));
    if pack.revisions().is_empty() {
        lines.push(NO_REVISIONS_ROW.to_string());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
