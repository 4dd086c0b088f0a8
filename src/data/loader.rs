use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::FlashlightDb;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a measurement database from a file. Dispatch by extension.
///
/// Only `.json` databases are supported; the typed parse doubles as the
/// schema check, so a structurally invalid document fails here rather than
/// midway through a pipeline run.
pub fn load_file(path: &Path) -> Result<FlashlightDb> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        other => bail!("Unsupported database extension: .{other}"),
    }
}

fn load_json(path: &Path) -> Result<FlashlightDb> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading database {}", path.display()))?;
    let db: FlashlightDb =
        serde_json::from_str(&text).context("parsing measurement database")?;

    log::debug!(
        "database {} (version {}): {} flashlights",
        path.display(),
        db.version,
        db.flashlights.len()
    );
    for fl in &db.flashlights {
        log::debug!(
            "  {} {} ({}, {}): {} measures",
            fl.id,
            fl.model,
            fl.status,
            fl.configuration,
            fl.measures.len()
        );
    }

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_extensions() {
        let err = load_file(Path::new("measures.yaml")).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }

    #[test]
    fn loads_a_json_database() {
        let path = std::env::temp_dir().join(format!(
            "chroma_spec_loader_{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{
                "version": "0.0.1",
                "flashlights": [
                    {
                        "id": "002",
                        "model": "TS10",
                        "status": "active",
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
            }"#,
        )
        .unwrap();

        let db = load_file(&path).unwrap();
        assert_eq!(db.flashlights.len(), 1);
        assert_eq!(db.flashlights[0].measures.len(), 1);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn surfaces_parse_errors_with_context() {
        let path = std::env::temp_dir().join(format!(
            "chroma_spec_loader_bad_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"version": "0.0.1"}"#).unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("parsing measurement database"));

        std::fs::remove_file(&path).ok();
    }
}
