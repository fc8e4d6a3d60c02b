use std::path::{Path, PathBuf};

use dialoguer::{Input, Select};
use non_empty_string::NonEmptyString;
use techpack::{Config, MeasurementSpec, Revision, StyleInfo, TechPack, parse_trims, starter_pack};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Edit {
    /// Tech pack JSON path (defaults to `data_file` from the configuration)
    #[arg(long)]
    file: Option<PathBuf>,
}

impl Edit {
    #[instrument(skip(config))]
    pub fn run(self, mut config: Config) -> anyhow::Result<()> {
        if let Some(file) = self.file {
            config.set_data_file(file);
        }
        let path = config.data_file().to_path_buf();
        let mut pack = load_or_seed(&path)?;

        loop {
            print_summary(&pack, &path);

            let selection = Select::new()
                .with_prompt("What would you like to do?")
                .items(&Action::LABELS[..])
                .default(0)
                .interact()?;

            let outcome = match Action::ALL[selection] {
                Action::EditStyle => edit_style(&mut pack, &path)?,
                Action::AddMeasurement => add_measurement(&mut pack, &path)?,
                Action::DeleteMeasurement => delete_measurement(&mut pack, &path)?,
                Action::AddRevision => add_revision(&mut pack, &path, &config)?,
                Action::Export => export(&pack, &config)?,
                Action::Validate => validate(&pack),
                Action::Quit => break,
            };

            println!("{outcome}\n");
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    EditStyle,
    AddMeasurement,
    DeleteMeasurement,
    AddRevision,
    Export,
    Validate,
    Quit,
}

impl Action {
    const ALL: [Self; 7] = [
        Self::EditStyle,
        Self::AddMeasurement,
        Self::DeleteMeasurement,
        Self::AddRevision,
        Self::Export,
        Self::Validate,
        Self::Quit,
    ];

    const LABELS: [&'static str; 7] = [
        "Edit style details",
        "Add measurement spec",
        "Delete measurement spec",
        "Add revision",
        "Export Markdown and JSON",
        "Validate",
        "Quit",
    ];
}

/// Loads the pack at `path`, or writes a starter pack there if the file
/// does not exist.
fn load_or_seed(path: &Path) -> anyhow::Result<TechPack> {
    if path.exists() {
        return Ok(TechPack::load(path)?);
    }

    tracing::info!(path = %path.display(), "seeding starter tech pack");
    let pack = starter_pack();
    pack.save(path)?;
    Ok(pack)
}

fn print_summary(pack: &TechPack, path: &Path) {
    let style = pack.style();
    println!(
        "{} {} ({})",
        style.style_number, style.style_name, style.season
    );
    println!("{}", path.display().to_string().dim());

    if pack.measurements().is_empty() {
        println!("  {}", "No measurement specs yet".dim());
    }
    for (idx, spec) in pack.measurements().iter().enumerate() {
        println!(
            "  {:>3}. {} / {}: {} ±{} {}",
            idx + 1,
            spec.pom,
            spec.size,
            spec.value,
            spec.tolerance,
            spec.notes.dim()
        );
    }

    if let Some(latest) = pack.revisions().last() {
        println!(
            "  Latest revision: {} by {} ({})",
            latest.version, latest.author, latest.timestamp
        );
    }
    println!();
}

/// A required form field was left blank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{0} is required")]
struct MissingField(&'static str);

/// Rejects blank input but keeps what was typed, surrounding whitespace
/// included.
fn required(field: &'static str, value: String) -> Result<NonEmptyString, MissingField> {
    if value.trim().is_empty() {
        return Err(MissingField(field));
    }
    NonEmptyString::new(value).map_err(|_| MissingField(field))
}

/// The style form. Every field is free text; trims are comma-separated.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StyleForm {
    style_number: String,
    style_name: String,
    season: String,
    brand: String,
    fabric: String,
    trims: String,
}

impl StyleForm {
    fn from_style(style: &StyleInfo) -> Self {
        Self {
            style_number: style.style_number.clone(),
            style_name: style.style_name.clone(),
            season: style.season.clone(),
            brand: style.brand.clone(),
            fabric: style.fabric.clone(),
            trims: style.trims.join(", "),
        }
    }

    fn into_style(self) -> StyleInfo {
        StyleInfo {
            style_number: self.style_number,
            style_name: self.style_name,
            season: self.season,
            brand: self.brand,
            fabric: self.fabric,
            trims: parse_trims(&self.trims),
        }
    }
}

/// The measurement form. Only the POM is required.
#[derive(Debug, Clone, PartialEq)]
struct MeasurementForm {
    pom: String,
    size: String,
    value: f64,
    tolerance: f64,
    notes: String,
}

impl MeasurementForm {
    fn into_spec(self) -> Result<MeasurementSpec, MissingField> {
        let pom = required("POM", self.pom)?;
        Ok(
            MeasurementSpec::new(pom.as_str(), self.size, self.value, self.tolerance)
                .with_notes(self.notes),
        )
    }
}

/// The revision form. Version, author and summary are all required.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RevisionForm {
    version: String,
    author: String,
    summary: String,
}

impl RevisionForm {
    fn into_revision(self) -> Result<Revision, MissingField> {
        let version = required("Version", self.version)?;
        let author = required("Author", self.author)?;
        let summary = required("Summary", self.summary)?;
        Ok(Revision::new(
            version.as_str(),
            author.as_str(),
            summary.as_str(),
            None,
        ))
    }
}

fn text(prompt: &str, initial: &str) -> dialoguer::Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
}

fn number(prompt: &str, default: f64) -> dialoguer::Result<f64> {
    Input::<f64>::new()
        .with_prompt(prompt)
        .default(default)
        .validate_with(|value: &f64| {
            if value.is_finite() {
                Ok(())
            } else {
                Err("must be a finite number")
            }
        })
        .interact_text()
}

fn edit_style(pack: &mut TechPack, path: &Path) -> anyhow::Result<String> {
    let current = StyleForm::from_style(pack.style());
    let form = StyleForm {
        style_number: text("Style Number", &current.style_number)?,
        style_name: text("Style Name", &current.style_name)?,
        season: text("Season", &current.season)?,
        brand: text("Brand", &current.brand)?,
        fabric: text("Fabric", &current.fabric)?,
        trims: text("Trims (comma-separated)", &current.trims)?,
    };

    pack.set_style(form.into_style());
    pack.save(path)?;
    Ok("Style details saved!".success())
}

fn add_measurement(pack: &mut TechPack, path: &Path) -> anyhow::Result<String> {
    let form = MeasurementForm {
        pom: text("POM", "")?,
        size: text("Size", "M")?,
        value: number("Measurement", 0.0)?,
        tolerance: number("Tolerance", 0.25)?,
        notes: text("Notes", "")?,
    };

    match form.into_spec() {
        Ok(spec) => {
            pack.add_measurement(spec);
            pack.save(path)?;
            Ok("Measurement spec added!".success())
        }
        Err(missing) => Ok(missing.to_string().warning()),
    }
}

fn delete_measurement(pack: &mut TechPack, path: &Path) -> anyhow::Result<String> {
    if pack.measurements().is_empty() {
        return Ok("No measurement specs to delete".dim());
    }

    let mut items: Vec<String> = pack
        .measurements()
        .iter()
        .enumerate()
        .map(|(idx, spec)| format!("{}. {} / {}", idx + 1, spec.pom, spec.size))
        .collect();
    items.push("Cancel".to_string());

    let selection = Select::new()
        .with_prompt("Delete which spec?")
        .items(&items[..])
        .default(items.len() - 1)
        .interact()?;

    if selection == items.len() - 1 {
        return Ok("Cancelled".dim());
    }

    let removed = pack.remove_measurement(selection)?;
    pack.save(path)?;
    Ok(format!("Deleted {} / {}", removed.pom, removed.size).success())
}

fn add_revision(pack: &mut TechPack, path: &Path, config: &Config) -> anyhow::Result<String> {
    let next_version = format!("v{}", pack.revisions().len() + 1);
    let form = RevisionForm {
        version: text("Version", &next_version)?,
        author: text("Author", config.default_author.as_deref().unwrap_or_default())?,
        summary: text("Summary", "")?,
    };

    match form.into_revision() {
        Ok(revision) => {
            pack.add_revision(revision);
            pack.save(path)?;
            Ok("Revision added!".success())
        }
        Err(missing) => Ok(format!("{missing}; revision not added").warning()),
    }
}

/// Writes the Markdown report and a raw JSON copy, then shows the report.
fn export(pack: &TechPack, config: &Config) -> anyhow::Result<String> {
    let markdown = pack.to_markdown();
    std::fs::write(config.markdown_file(), &markdown).map_err(|e| {
        anyhow::anyhow!("Failed to write {}: {e}", config.markdown_file().display())
    })?;
    std::fs::write(config.json_export_file(), techpack::storage::to_json(pack)?).map_err(|e| {
        anyhow::anyhow!("Failed to write {}: {e}", config.json_export_file().display())
    })?;

    println!("{markdown}");
    Ok(format!(
        "Exported {} and {}",
        config.markdown_file().display(),
        config.json_export_file().display()
    )
    .success())
}

fn validate(pack: &TechPack) -> String {
    super::validate::render_text(&pack.validate())
}
