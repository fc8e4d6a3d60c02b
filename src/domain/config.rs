use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for the interactive editor.
///
/// Read from an optional `techpack.toml` in the working directory. Every
/// field may be omitted; omitted fields take their defaults. The
/// command-line `--file` and `--out` defaults are not affected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The tech pack file the editor loads, seeds and saves.
    data_file: PathBuf,

    /// Where the editor's export view writes the Markdown report.
    markdown_file: PathBuf,

    /// Where the editor's export view writes the raw JSON copy.
    json_export_file: PathBuf,

    /// Author pre-filled in the editor's revision form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_author: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("tech_pack.json"),
            markdown_file: PathBuf::from("tech_pack.md"),
            json_export_file: PathBuf::from("tech_pack_export.json"),
            default_author: None,
        }
    }
}

impl Config {
    /// The conventional config file name.
    pub const FILE_NAME: &'static str = "techpack.toml";

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration if the file exists, otherwise returns the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The tech pack file the editor works on.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// The Markdown export target.
    #[must_use]
    pub fn markdown_file(&self) -> &Path {
        &self.markdown_file
    }

    /// The raw JSON export target.
    #[must_use]
    pub fn json_export_file(&self) -> &Path {
        &self.json_export_file
    }

    /// Sets the tech pack file the editor works on.
    pub fn set_data_file(&mut self, path: impl Into<PathBuf>) {
        self.data_file = path.into();
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_default(&tmp.path().join(Config::FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data_file(), Path::new("tech_pack.json"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(Config::FILE_NAME);
        std::fs::write(&path, "data_file = \"packs/tee.json\"\ndefault_author = \"qa\"\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.data_file(), Path::new("packs/tee.json"));
        assert_eq!(config.markdown_file(), Path::new("tech_pack.md"));
        assert_eq!(config.default_author.as_deref(), Some("qa"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(Config::FILE_NAME);
        std::fs::write(&path, "colour = \"red\"\n").unwrap();

        let error = Config::load(&path).unwrap_err();
        assert!(error.starts_with("Failed to parse config file"));
    }

    #[test]
    fn save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(Config::FILE_NAME);
        let mut config = Config::default();
        config.set_data_file("other.json");
        config.default_author = Some("designer".to_string());

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
