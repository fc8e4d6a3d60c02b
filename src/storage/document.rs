use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::{MeasurementSpec, Revision, StyleInfo, TechPack};

/// Errors that can occur when loading a tech pack.
///
/// Each variant names the first part of the document that could not be
/// read. Serde's message (available as the error source) names the missing
/// or invalid field.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read tech pack file")]
    Io(#[from] io::Error),
    /// The content is not valid JSON.
    #[error("tech pack file is not valid JSON")]
    Json(#[source] serde_json::Error),
    /// The top level of the document is not a JSON object.
    #[error("invalid tech pack payload; expected JSON object")]
    NotAnObject,
    /// The document has no `style` key.
    #[error("invalid tech pack payload; missing `style`")]
    MissingStyle,
    /// The `style` object is malformed.
    #[error("invalid `style`")]
    Style(#[source] serde_json::Error),
    /// A list key holds something other than a list.
    #[error("invalid tech pack payload; `{key}` must be a list")]
    NotAList {
        /// The offending key.
        key: &'static str,
    },
    /// A measurement entry is malformed.
    #[error("invalid measurement at row {row}")]
    Measurement {
        /// The 1-based position of the entry.
        row: usize,
        /// What was wrong with it.
        source: serde_json::Error,
    },
    /// A revision entry is malformed.
    #[error("invalid revision at row {row}")]
    Revision {
        /// The 1-based position of the entry.
        row: usize,
        /// What was wrong with it.
        source: serde_json::Error,
    },
}

/// Errors that can occur when saving a tech pack.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The file could not be written.
    #[error("failed to write tech pack file")]
    Io(#[from] io::Error),
    /// The pack could not be encoded.
    #[error("failed to encode tech pack")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StyleDocument {
    style_number: String,
    style_name: String,
    season: String,
    brand: String,
    fabric: String,
    #[serde(default)]
    trims: Vec<String>,
}

impl From<StyleDocument> for StyleInfo {
    fn from(doc: StyleDocument) -> Self {
        Self {
            style_number: doc.style_number,
            style_name: doc.style_name,
            season: doc.season,
            brand: doc.brand,
            fabric: doc.fabric,
            trims: doc.trims,
        }
    }
}

impl From<&StyleInfo> for StyleDocument {
    fn from(style: &StyleInfo) -> Self {
        Self {
            style_number: style.style_number.clone(),
            style_name: style.style_name.clone(),
            season: style.season.clone(),
            brand: style.brand.clone(),
            fabric: style.fabric.clone(),
            trims: style.trims.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct MeasurementDocument {
    pom: String,
    size: String,
    value: f64,
    tolerance: f64,
    #[serde(default)]
    notes: String,
}

impl From<MeasurementDocument> for MeasurementSpec {
    fn from(doc: MeasurementDocument) -> Self {
        Self {
            pom: doc.pom,
            size: doc.size,
            value: doc.value,
            tolerance: doc.tolerance,
            notes: doc.notes,
        }
    }
}

impl From<&MeasurementSpec> for MeasurementDocument {
    fn from(spec: &MeasurementSpec) -> Self {
        Self {
            pom: spec.pom.clone(),
            size: spec.size.clone(),
            value: spec.value,
            tolerance: spec.tolerance,
            notes: spec.notes.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RevisionDocument {
    version: String,
    author: String,
    summary: String,
    // Absent in hand-written files; stamped at load time.
    #[serde(default)]
    timestamp: Option<String>,
}

impl From<RevisionDocument> for Revision {
    fn from(doc: RevisionDocument) -> Self {
        Self::new(doc.version, doc.author, doc.summary, doc.timestamp)
    }
}

impl From<&Revision> for RevisionDocument {
    fn from(revision: &Revision) -> Self {
        Self {
            version: revision.version.clone(),
            author: revision.author.clone(),
            summary: revision.summary.clone(),
            timestamp: Some(revision.timestamp.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
struct TechPackDocument {
    style: StyleDocument,
    measurements: Vec<MeasurementDocument>,
    revisions: Vec<RevisionDocument>,
}

impl From<&TechPack> for TechPackDocument {
    fn from(pack: &TechPack) -> Self {
        Self {
            style: pack.style().into(),
            measurements: pack.measurements().iter().map(Into::into).collect(),
            revisions: pack.revisions().iter().map(Into::into).collect(),
        }
    }
}

/// Converts a tech pack to a JSON value with `style`, `measurements` and
/// `revisions` keys.
///
/// # Errors
///
/// Returns an error if the pack cannot be represented as JSON.
pub fn to_value(pack: &TechPack) -> Result<Value, serde_json::Error> {
    serde_json::to_value(TechPackDocument::from(pack))
}

/// Converts a JSON value back into a tech pack.
///
/// `style` is required. Missing `measurements` or `revisions` keys give
/// empty lists. Other top-level keys are ignored.
///
/// # Errors
///
/// Returns an error naming the first part of the document that is missing
/// or malformed.
pub fn from_value(value: Value) -> Result<TechPack, LoadError> {
    let Value::Object(mut map) = value else {
        return Err(LoadError::NotAnObject);
    };

    let style = map.remove("style").ok_or(LoadError::MissingStyle)?;
    let style: StyleDocument = serde_json::from_value(style).map_err(LoadError::Style)?;

    let measurements = take_list(&mut map, "measurements")?
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value::<MeasurementDocument>(item)
                .map(MeasurementSpec::from)
                .map_err(|source| LoadError::Measurement {
                    row: idx + 1,
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let revisions = take_list(&mut map, "revisions")?
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value::<RevisionDocument>(item)
                .map(Revision::from)
                .map_err(|source| LoadError::Revision {
                    row: idx + 1,
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TechPack::from_parts(style.into(), measurements, revisions))
}

fn take_list(map: &mut Map<String, Value>, key: &'static str) -> Result<Vec<Value>, LoadError> {
    match map.remove(key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(LoadError::NotAList { key }),
    }
}

/// Encodes a tech pack as pretty-printed JSON (two-space indent).
///
/// # Errors
///
/// Returns an error if the pack cannot be represented as JSON.
pub fn to_json(pack: &TechPack) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TechPackDocument::from(pack))
}

/// Decodes a tech pack from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not JSON or does not describe a tech
/// pack (see [`from_value`]).
pub fn from_json(json: &str) -> Result<TechPack, LoadError> {
    let value: Value = serde_json::from_str(json).map_err(LoadError::Json)?;
    from_value(value)
}

/// Reads a tech pack from a UTF-8 JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
#[instrument(level = "debug")]
pub fn load(path: &Path) -> Result<TechPack, LoadError> {
    let content = fs::read_to_string(path)?;
    let pack = from_json(&content)?;
    tracing::debug!(
        measurements = pack.measurements().len(),
        revisions = pack.revisions().len(),
        "loaded tech pack"
    );
    Ok(pack)
}

/// Writes a tech pack to a file, replacing any existing content.
///
/// # Errors
///
/// Returns an error if the pack cannot be encoded or the file cannot be
/// written.
#[instrument(level = "debug", skip(pack))]
pub fn save(pack: &TechPack, path: &Path) -> Result<(), SaveError> {
    let content = to_json(pack)?;
    fs::write(path, content)?;
    tracing::debug!("saved tech pack");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::starter_pack;

    fn sample_value() -> Value {
        json!({
            "style": {
                "style_number": "ST-001",
                "style_name": "Classic Tee",
                "season": "FW26",
                "brand": "Sample Brand",
                "fabric": "100% Cotton Jersey",
                "trims": ["Neck rib", "Main label"]
            },
            "measurements": [
                {
                    "pom": "Body Length (HPS)",
                    "size": "M",
                    "value": 27.0,
                    "tolerance": 0.25,
                    "notes": "Measure from high point shoulder"
                }
            ],
            "revisions": [
                {
                    "version": "v1",
                    "author": "designer",
                    "summary": "Initial draft",
                    "timestamp": "2025-07-14T07:15:00+00:00"
                }
            ]
        })
    }

    #[test]
    fn value_round_trip() {
        let value = sample_value();
        let pack = from_value(value.clone()).unwrap();
        assert_eq!(to_value(&pack).unwrap(), value);
    }

    #[test]
    fn serialized_document_has_exactly_three_keys() {
        let value = to_value(&starter_pack()).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["measurements", "revisions", "style"]);
    }

    #[test]
    fn file_round_trip_after_mutation() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pack.json");

        let mut pack = starter_pack();
        pack.add_measurement(MeasurementSpec::new("Chest", "L", 22.5, 0.25));
        pack.add_revision(Revision::new("v2", "qa", "Adjusted chest", None));
        save(&pack, &path).unwrap();

        let loaded = load(&path).unwrap();

        assert_eq!(loaded, pack);
        assert_eq!(loaded.style().style_number, "ST-001");
        assert_eq!(loaded.measurements().len(), 2);
        assert_eq!(loaded.measurements()[1].pom, "Chest");
        assert_eq!(loaded.revisions().last().unwrap().version, "v2");
    }

    #[test]
    fn saved_file_is_pretty_printed_with_two_spaces() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pack.json");
        save(&starter_pack(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n  \"style\": {\n    \"style_number\": \"ST-001\""));
    }

    #[test]
    fn save_overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pack.json");
        fs::write(&path, "x".repeat(10_000)).unwrap();

        save(&starter_pack(), &path).unwrap();

        assert!(load(&path).is_ok());
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let mut value = sample_value();
        let map = value.as_object_mut().unwrap();
        map.remove("measurements");
        map.remove("revisions");

        let pack = from_value(value).unwrap();

        assert!(pack.measurements().is_empty());
        assert!(pack.revisions().is_empty());
    }

    #[test]
    fn optional_record_fields_default() {
        let mut value = sample_value();
        value["style"].as_object_mut().unwrap().remove("trims");
        value["measurements"][0].as_object_mut().unwrap().remove("notes");
        value["revisions"][0].as_object_mut().unwrap().remove("timestamp");

        let pack = from_value(value).unwrap();

        assert!(pack.style().trims.is_empty());
        assert_eq!(pack.measurements()[0].notes, "");
        assert!(!pack.revisions()[0].timestamp.is_empty());
    }

    #[test]
    fn integer_measurements_are_accepted() {
        let mut value = sample_value();
        value["measurements"][0]["value"] = json!(27);
        value["measurements"][0]["tolerance"] = json!(0);

        let pack = from_value(value).unwrap();

        assert!((pack.measurements()[0].value - 27.0).abs() < f64::EPSILON);
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(matches!(from_json("[1, 2]"), Err(LoadError::NotAnObject)));
        assert!(matches!(from_json("\"pack\""), Err(LoadError::NotAnObject)));
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(matches!(from_json("{"), Err(LoadError::Json(_))));
    }

    #[test]
    fn missing_style_is_rejected() {
        let mut value = sample_value();
        value.as_object_mut().unwrap().remove("style");
        assert!(matches!(from_value(value), Err(LoadError::MissingStyle)));
    }

    #[test]
    fn malformed_style_names_the_field() {
        let mut value = sample_value();
        value["style"].as_object_mut().unwrap().remove("brand");

        let Err(LoadError::Style(source)) = from_value(value) else {
            panic!("expected a style error");
        };
        assert!(source.to_string().contains("brand"));
    }

    #[test]
    fn unknown_style_field_is_rejected() {
        let mut value = sample_value();
        value["style"]["colourway"] = json!("black");

        let Err(LoadError::Style(source)) = from_value(value) else {
            panic!("expected a style error");
        };
        assert!(source.to_string().contains("colourway"));
    }

    #[test]
    fn malformed_measurement_names_row_and_field() {
        let mut value = sample_value();
        value["measurements"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "pom": "Chest", "size": "M", "value": "wide", "tolerance": 0.25 }));

        let Err(LoadError::Measurement { row, source }) = from_value(value) else {
            panic!("expected a measurement error");
        };
        assert_eq!(row, 2);
        assert!(source.to_string().contains("invalid type"));
    }

    #[test]
    fn malformed_revision_names_row_and_field() {
        let mut value = sample_value();
        value["revisions"][0].as_object_mut().unwrap().remove("author");

        let Err(LoadError::Revision { row, source }) = from_value(value) else {
            panic!("expected a revision error");
        };
        assert_eq!(row, 1);
        assert!(source.to_string().contains("author"));
    }

    #[test]
    fn list_keys_must_be_lists() {
        let mut value = sample_value();
        value["revisions"] = json!({ "v1": "Initial draft" });
        assert!(matches!(
            from_value(value),
            Err(LoadError::NotAList { key: "revisions" })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            load(&tmp.path().join("absent.json")),
            Err(LoadError::Io(_))
        ));
    }
}
