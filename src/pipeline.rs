use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::animate;
use crate::chart::{plot, Bounds, ChartSpec};
use crate::chroma::{self, ChromaStats};
use crate::data::model::{Flashlight, FlashlightDb};

// ---------------------------------------------------------------------------
// Viewing windows
// ---------------------------------------------------------------------------

/// Default window for standalone charts: the whole useful locus region.
const SINGLE_WINDOW: Bounds = Bounds {
    x_min: 0.30,
    x_max: 0.75,
    y_min: 0.25,
    y_max: 0.65,
};

/// Half-width of the window when zooming onto one measure.
const ZOOM_MARGIN: f64 = 0.08;

/// Tight window for evolution charts.
const EVOLUTION_WINDOW: Bounds = Bounds {
    x_min: 0.32,
    x_max: 0.42,
    y_min: 0.32,
    y_max: 0.42,
};

/// Window for animation frames.
const FRAME_WINDOW: Bounds = Bounds {
    x_min: 0.30,
    x_max: 0.40,
    y_min: 0.30,
    y_max: 0.40,
};

// ---------------------------------------------------------------------------
// Run options
// ---------------------------------------------------------------------------

/// Output-directory policy for a pipeline run.
///
/// By default directories are created idempotently, same-named files are
/// overwritten, and stale unrelated files are left in place.
/// `clear_existing` wipes each model directory first.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub clear_existing: bool,
}

fn source_dir(outdir: &Path, fl: &Flashlight, opts: RunOptions) -> Result<PathBuf> {
    let dir = outdir.join(&fl.model);
    if opts.clear_existing && dir.exists() {
        fs::remove_dir_all(&dir)
            .with_context(|| format!("clearing output directory {}", dir.display()))?;
    }
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    Ok(dir)
}

// ---------------------------------------------------------------------------
// Single chart
// ---------------------------------------------------------------------------

fn measure_label(label: &str, x: f64, y: f64, stats: &ChromaStats) -> String {
    format!(
        "{label} [{x}; {y}]\nCCT: {cct:4.0}K\nDUV: {duv:.4}\n",
        cct = stats.cct,
        duv = stats.duv
    )
}

/// Chart one chromaticity measure as `{label}.svg` inside `outdir`.
///
/// The title block carries the point's CCT and Duv; a degenerate point
/// aborts the artifact with a geometry error.
pub fn chart_single(x: f64, y: f64, label: &str, outdir: &Path, zoom: bool) -> Result<PathBuf> {
    let stats = chroma::stats(x, y)?;
    let bounds = if zoom {
        Bounds::around(x, y, ZOOM_MARGIN)
    } else {
        SINGLE_WINDOW
    };
    let spec = ChartSpec {
        points: vec![(label.to_string(), (x, y))],
        bounds,
        title: Some(measure_label(label, x, y, &stats)),
    };
    let dest = outdir.join(format!("{label}.svg"));
    plot::render_svg(&spec, &dest)?;
    Ok(dest)
}

// ---------------------------------------------------------------------------
// Database runs
// ---------------------------------------------------------------------------

/// One standalone chart per measure, grouped into per-model directories.
pub fn run_batch(db: &FlashlightDb, outdir: &Path, opts: RunOptions) -> Result<()> {
    for fl in &db.flashlights {
        let dir = source_dir(outdir, fl, opts)?;
        for m in &fl.measures {
            chart_single(m.ciex, m.ciey, &m.artifact_stem(&fl.model), &dir, false)?;
        }
    }
    Ok(())
}

/// One chart per flashlight overlaying every measure, named by model.
pub fn run_evolution(db: &FlashlightDb, outdir: &Path, opts: RunOptions) -> Result<()> {
    for fl in &db.flashlights {
        let dir = source_dir(outdir, fl, opts)?;
        let spec = ChartSpec {
            points: fl
                .measures
                .iter()
                .map(|m| (m.point_label(), (m.ciex, m.ciey)))
                .collect(),
            bounds: EVOLUTION_WINDOW,
            title: Some(fl.model.clone()),
        };
        plot::render_svg(&spec, &dir.join(format!("{}.svg", fl.model)))?;
    }
    Ok(())
}

/// One animated GIF per flashlight with two or more measures.
///
/// Each measure becomes one PNG frame on disk; the encoder then reads the
/// frames back in measure order. Sources with fewer than two measures are
/// skipped silently so no single-frame animations get produced.
pub fn run_animations(db: &FlashlightDb, outdir: &Path, opts: RunOptions) -> Result<()> {
    for fl in &db.flashlights {
        let dir = source_dir(outdir, fl, opts)?;
        if fl.measures.len() < 2 {
            log::debug!("skipping {}: fewer than two measures", fl.model);
            continue;
        }

        let mut frames = Vec::with_capacity(fl.measures.len());
        for m in &fl.measures {
            let dest = dir.join(format!("{}.png", m.frame_stem()));
            let spec = ChartSpec {
                points: vec![(m.frame_stem(), (m.ciex, m.ciey))],
                bounds: FRAME_WINDOW,
                title: Some(fl.model.clone()),
            };
            plot::render_png(&spec, &dest)?;
            frames.push(dest);
        }

        animate::assemble(
            &frames,
            &dir.join(format!("{}.gif", fl.model)),
            animate::FRAME_DELAY_MS,
            animate::REPLAY_COUNT,
        )?;
    }
    Ok(())
}

/// Log CCT/Duv for every measure; optionally export the table as CSV.
pub fn run_stats(db: &FlashlightDb, csv_out: Option<&Path>) -> Result<()> {
    let mut writer = match csv_out {
        Some(path) => {
            let w = csv::Writer::from_path(path)
                .with_context(|| format!("creating report {}", path.display()))?;
            Some(w)
        }
        None => None,
    };
    if let Some(w) = writer.as_mut() {
        w.write_record(["model", "mod", "level", "date", "ciex", "ciey", "cct_k", "duv"])?;
    }

    for fl in &db.flashlights {
        for m in &fl.measures {
            let stats = chroma::stats(m.ciex, m.ciey)?;
            if let Some(w) = writer.as_mut() {
                let ciex = m.ciex.to_string();
                let ciey = m.ciey.to_string();
                let cct = format!("{:.1}", stats.cct);
                let duv = format!("{:.4}", stats.duv);
                w.write_record([
                    fl.model.as_str(),
                    m.mod_tag.as_str(),
                    m.level.as_str(),
                    m.date.as_str(),
                    ciex.as_str(),
                    ciey.as_str(),
                    cct.as_str(),
                    duv.as_str(),
                ])?;
            }
        }
    }

    if let Some(w) = writer.as_mut() {
        w.flush()?;
    }
    Ok(())
}
