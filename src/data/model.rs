use serde::Deserialize;

// ---------------------------------------------------------------------------
// Measure – one chromaticity reading of one emitter
// ---------------------------------------------------------------------------

/// A single chromaticity measurement.
///
/// `mod` in the document is the modification tag ("og" for original); the
/// level string names the brightness level the reading was taken at. Both
/// are free-form and flow into artifact file names unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct Measure {
    pub date: String,
    #[serde(rename = "mod")]
    pub mod_tag: String,
    pub level: String,
    pub ciex: f64,
    pub ciey: f64,
}

impl Measure {
    /// File stem for a standalone chart: `{model}_{mod}_{level}`.
    pub fn artifact_stem(&self, model: &str) -> String {
        format!("{}_{}_{}", model, self.mod_tag, self.level)
    }

    /// File stem for an animation frame: `{mod}_{level}`, no model prefix.
    pub fn frame_stem(&self) -> String {
        format!("{}_{}", self.mod_tag, self.level)
    }

    /// Point label on evolution charts: `{mod} {level}`.
    pub fn point_label(&self) -> String {
        format!("{} {}", self.mod_tag, self.level)
    }
}

// ---------------------------------------------------------------------------
// Flashlight – one light source with its measurement history
// ---------------------------------------------------------------------------

/// A light source and its measurements in chronological order.
///
/// Measurement order is meaningful: it drives animation frame order and
/// evolution-chart legend order. Model names are assumed unique; colliding
/// names overwrite each other's artifacts silently.
#[derive(Debug, Clone, Deserialize)]
pub struct Flashlight {
    pub id: String,
    pub model: String,
    pub status: String,
    pub configuration: String,
    pub measures: Vec<Measure>,
}

// ---------------------------------------------------------------------------
// FlashlightDb – the complete loaded database
// ---------------------------------------------------------------------------

/// The full measurement database, read-only for the duration of a run.
#[derive(Debug, Clone, Deserialize)]
pub struct FlashlightDb {
    pub version: String,
    pub flashlights: Vec<Flashlight>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DB: &str = r#"{
        "version": "0.0.1",
        "flashlights": [
            {
                "id": "002",
                "model": "TS10",
                "status": "stolen",
                "configuration": "stock",
                "measures": [
                    {
                        "date": "2022-07-21",
                        "mod": "og",
                        "level": "1-150",
                        "ciex": 0.3418,
                        "ciey": 0.3518
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_versioned_database() {
        let db: FlashlightDb = serde_json::from_str(SAMPLE_DB).unwrap();
        assert_eq!(db.version, "0.0.1");
        assert_eq!(db.flashlights.len(), 1);

        let fl = &db.flashlights[0];
        assert_eq!(fl.model, "TS10");
        assert_eq!(fl.status, "stolen");
        assert_eq!(fl.configuration, "stock");
        assert_eq!(fl.measures[0].mod_tag, "og");
        assert_eq!(fl.measures[0].ciex, 0.3418);
    }

    #[test]
    fn missing_fields_fail_the_typed_parse() {
        let broken = r#"{"version": "0.0.1", "flashlights": [{"model": "TS10"}]}"#;
        assert!(serde_json::from_str::<FlashlightDb>(broken).is_err());
    }

    #[test]
    fn naming_scheme_splits_single_and_frame_stems() {
        let m = Measure {
            date: "2022-07-21".to_string(),
            mod_tag: "og".to_string(),
            level: "1-150".to_string(),
            ciex: 0.3418,
            ciey: 0.3518,
        };
        assert_eq!(m.artifact_stem("TS10"), "TS10_og_1-150");
        assert_eq!(m.frame_stem(), "og_1-150");
        assert_eq!(m.point_label(), "og 1-150");
    }
}
