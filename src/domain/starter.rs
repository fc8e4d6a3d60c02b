use crate::{MeasurementSpec, Revision, StyleInfo, TechPack};

/// Builds the starter pack used to bootstrap a new tech pack file.
///
/// It holds one base-size measurement and an initial revision stamped with
/// the current time.
#[must_use]
pub fn starter_pack() -> TechPack {
    let mut pack = TechPack::new(StyleInfo {
        style_number: "ST-001".to_string(),
        style_name: "Classic Tee".to_string(),
        season: "FW26".to_string(),
        brand: "Sample Brand".to_string(),
        fabric: "100% Cotton Jersey".to_string(),
        trims: vec!["Neck rib".to_string(), "Main label".to_string()],
    });
    pack.add_measurement(
        MeasurementSpec::new("Body Length (HPS)", "M", 27.0, 0.25)
            .with_notes("Measure from high point shoulder"),
    );
    pack.add_revision(Revision::new("v1", "designer", "Initial draft", None));
    pack
}
