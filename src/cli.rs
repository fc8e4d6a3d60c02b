use std::path::{Path, PathBuf};

mod edit;
mod terminal;
mod validate;

use clap::ArgAction;
use edit::Edit;
use techpack::{Config, MeasurementSpec, Revision, TechPack, starter_pack};
use tracing::instrument;
use validate::Validate;

use terminal::Colorize;

const DEFAULT_FILE: &str = "tech_pack.json";

/// Parse a measurement or tolerance, rejecting NaN and infinities.
///
/// This is a CLI boundary check; the domain accepts any number and leaves
/// range checks to validation.
fn parse_number(s: &str) -> Result<f64, String> {
    let value: f64 = s.trim().parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{s}' is not a finite number"))
    }
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the editor configuration file
    #[arg(long, default_value = Config::FILE_NAME, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.run(&self.config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Create a starter tech pack JSON
    Init(Init),

    /// Add a measurement spec row
    AddSpec(AddSpec),

    /// Remove a measurement spec row
    RemoveSpec(RemoveSpec),

    /// Add a revision entry
    AddRevision(AddRevision),

    /// Export markdown tech pack
    ExportMd(ExportMd),

    /// Export measurement table to CSV
    ExportCsv(ExportCsv),

    /// Print the markdown tech pack
    Show(Show),

    /// Validate tech pack measurement data
    ///
    /// Exits with status 1 when any issue is found.
    Validate(Validate),

    /// Edit a tech pack interactively
    ///
    /// Works on the data file named in the configuration, creating a starter
    /// pack there if it does not exist yet.
    Edit(Edit),
}

impl Command {
    fn run(self, config_path: &Path) -> anyhow::Result<()> {
        match self {
            Self::Init(command) => command.run()?,
            Self::AddSpec(command) => command.run()?,
            Self::RemoveSpec(command) => command.run()?,
            Self::AddRevision(command) => command.run()?,
            Self::ExportMd(command) => command.run()?,
            Self::ExportCsv(command) => command.run()?,
            Self::Show(command) => command.run()?,
            Self::Validate(command) => command.run()?,
            Self::Edit(command) => {
                let config =
                    Config::load_or_default(config_path).map_err(|e| anyhow::anyhow!("{e}"))?;
                command.run(config)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {
    /// Output JSON path
    #[arg(long, default_value = DEFAULT_FILE)]
    out: PathBuf,
}

impl Init {
    #[instrument]
    fn run(self) -> anyhow::Result<()> {
        starter_pack().save(&self.out)?;
        println!(
            "{}",
            format!("Created starter tech pack at {}", self.out.display()).success()
        );
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct AddSpec {
    /// Existing tech pack JSON path
    #[arg(long, default_value = DEFAULT_FILE)]
    file: PathBuf,

    /// The point of measure, e.g. "Chest"
    #[arg(long)]
    pom: String,

    /// The size label, e.g. "M"
    #[arg(long)]
    size: String,

    /// The specified measurement
    #[arg(long, value_parser = parse_number, allow_negative_numbers = true)]
    value: f64,

    /// The permitted deviation either side of the measurement
    #[arg(long, value_parser = parse_number, allow_negative_numbers = true)]
    tolerance: f64,

    /// Measuring instructions
    #[arg(long, default_value = "")]
    notes: String,
}

impl AddSpec {
    #[instrument]
    fn run(self) -> anyhow::Result<()> {
        let mut pack = TechPack::load(&self.file)?;
        pack.add_measurement(
            MeasurementSpec::new(self.pom, self.size, self.value, self.tolerance)
                .with_notes(self.notes),
        );
        pack.save(&self.file)?;
        println!("Added spec row to {}", self.file.display());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct RemoveSpec {
    /// Existing tech pack JSON path
    #[arg(long, default_value = DEFAULT_FILE)]
    file: PathBuf,

    /// The 1-based row to remove, as reported by `validate`
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    row: usize,
}

impl RemoveSpec {
    #[instrument]
    fn run(self) -> anyhow::Result<()> {
        let mut pack = TechPack::load(&self.file)?;
        let removed = pack.remove_measurement(self.row - 1)?;
        pack.save(&self.file)?;
        println!(
            "Removed spec row {} ({} / {}) from {}",
            self.row,
            removed.pom,
            removed.size,
            self.file.display()
        );
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct AddRevision {
    /// Existing tech pack JSON path
    #[arg(long, default_value = DEFAULT_FILE)]
    file: PathBuf,

    /// The version label, e.g. "v2"
    #[arg(long = "version")]
    revision: String,

    /// Who made the change
    #[arg(long)]
    author: String,

    /// What changed
    #[arg(long)]
    summary: String,
}

impl AddRevision {
    #[instrument]
    fn run(self) -> anyhow::Result<()> {
        let mut pack = TechPack::load(&self.file)?;
        pack.add_revision(Revision::new(self.revision, self.author, self.summary, None));
        pack.save(&self.file)?;
        println!("Added revision to {}", self.file.display());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct ExportMd {
    /// Existing tech pack JSON path
    #[arg(long, default_value = DEFAULT_FILE)]
    file: PathBuf,

    /// Output markdown path
    #[arg(long, default_value = "tech_pack.md")]
    out: PathBuf,
}

impl ExportMd {
    #[instrument]
    fn run(self) -> anyhow::Result<()> {
        let pack = TechPack::load(&self.file)?;
        std::fs::write(&self.out, pack.to_markdown())
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", self.out.display()))?;
        println!("Exported markdown tech pack to {}", self.out.display());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct ExportCsv {
    /// Existing tech pack JSON path
    #[arg(long, default_value = DEFAULT_FILE)]
    file: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "measurements.csv")]
    out: PathBuf,
}

impl ExportCsv {
    #[instrument]
    fn run(self) -> anyhow::Result<()> {
        let pack = TechPack::load(&self.file)?;
        pack.export_measurements_csv(&self.out)?;
        println!("Exported measurements CSV to {}", self.out.display());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Show {
    /// Existing tech pack JSON path
    #[arg(long, default_value = DEFAULT_FILE)]
    file: PathBuf,
}

impl Show {
    #[instrument]
    fn run(self) -> anyhow::Result<()> {
        let pack = TechPack::load(&self.file)?;
        print!("{}", pack.to_markdown());
        Ok(())
    }
}
