use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::chroma;
use crate::color;

use super::{planckian_locus, ChartSpec};

// ---------------------------------------------------------------------------
// Rendering collaborator: plotters backends for charts and animation frames
// ---------------------------------------------------------------------------

/// Canvas for single and evolution charts.
pub const CHART_SIZE: (u32, u32) = (1280, 1000);

/// Canvas for animation frames, kept small for the GIF encoder.
pub const FRAME_SIZE: (u32, u32) = (640, 500);

const LOCUS_SAMPLES: usize = 240;
const LOCUS_COLOR: RGBColor = RGBColor(68, 68, 68);
const TICK_TEXT: RGBColor = RGBColor(102, 102, 102);

/// CCTs marked along the locus when they fall inside the viewing window.
const LOCUS_TICKS: [f64; 8] = [
    2000.0, 2700.0, 3500.0, 4500.0, 5500.0, 6500.0, 8000.0, 10000.0,
];

/// Write the chart described by `spec` as an SVG document at `dest`.
pub fn render_svg(spec: &ChartSpec, dest: &Path) -> Result<()> {
    let root = SVGBackend::new(dest, CHART_SIZE).into_drawing_area();
    draw(spec, &root).map_err(|e| anyhow!("rendering chart {}: {e}", dest.display()))?;
    log::debug!("wrote {}", dest.display());
    Ok(())
}

/// Rasterize the chart described by `spec` as a PNG frame at `dest`.
pub fn render_png(spec: &ChartSpec, dest: &Path) -> Result<()> {
    let root = BitMapBackend::new(dest, FRAME_SIZE).into_drawing_area();
    draw(spec, &root).map_err(|e| anyhow!("rendering frame {}: {e}", dest.display()))?;
    log::debug!("wrote {}", dest.display());
    Ok(())
}

fn draw<DB: DrawingBackend>(
    spec: &ChartSpec,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(
            spec.bounds.x_min..spec.bounds.x_max,
            spec.bounds.y_min..spec.bounds.y_max,
        )?;

    chart
        .configure_mesh()
        .x_desc("CIE x")
        .y_desc("CIE y")
        .x_labels(6)
        .y_labels(6)
        .label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()?;

    // Planckian locus with CCT marks
    chart.draw_series(LineSeries::new(
        planckian_locus(LOCUS_SAMPLES),
        LOCUS_COLOR.stroke_width(2),
    ))?;
    for cct in LOCUS_TICKS {
        let (x, y) = chroma::cct_to_xy(cct);
        if !spec.bounds.contains(x, y) {
            continue;
        }
        chart.draw_series(std::iter::once(
            EmptyElement::at((x, y))
                + Circle::new((0, 0), 3, LOCUS_COLOR.filled())
                + Text::new(
                    format!("{cct:.0}K"),
                    (6, 6),
                    ("sans-serif", 14).into_font().color(&TICK_TEXT),
                ),
        ))?;
    }

    // Measurement markers with labels; legend entries keep display order.
    let colors = color::generate_palette(spec.points.len());
    for ((label, (x, y)), marker) in spec.points.iter().zip(&colors) {
        let style = marker.filled();
        chart
            .draw_series(std::iter::once(
                EmptyElement::at((*x, *y))
                    + Circle::new((0, 0), 6, style)
                    + Text::new(label.clone(), (10, -18), ("sans-serif", 16)),
            ))?
            .label(label.as_str())
            .legend(move |(lx, ly)| Circle::new((lx, ly), 6, style));
    }
    if spec.points.len() > 1 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.9))
            .label_font(("sans-serif", 16))
            .draw()?;
    }

    // Multi-line title block, top-left over the plot
    if let Some(title) = &spec.title {
        for (i, line) in title.lines().filter(|l| !l.is_empty()).enumerate() {
            root.draw(&Text::new(
                line.to_string(),
                (90, 30 + i as i32 * 26),
                ("sans-serif", 20),
            ))?;
        }
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Bounds;

    fn scratch(name: &str) -> std::path::PathBuf {
        let pid = std::process::id();
        let path = std::path::Path::new(name);
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => std::env::temp_dir().join(format!("chroma_spec_plot_{stem}_{pid}.{ext}")),
            None => std::env::temp_dir().join(format!("chroma_spec_plot_{stem}_{pid}")),
        }
    }

    #[test]
    fn svg_chart_embeds_labels_title_and_locus() {
        let dest = scratch("single.svg");
        let spec = ChartSpec {
            points: vec![("og 1-150".to_string(), (0.3418, 0.3518))],
            bounds: Bounds::around(0.3418, 0.3518, 0.08),
            title: Some("TS10 [0.3418; 0.3518]\nCCT: 5124K\nDUV: 0.0014\n".to_string()),
        };
        render_svg(&spec, &dest).unwrap();

        let text = std::fs::read_to_string(&dest).unwrap();
        assert!(text.contains("<svg"));
        assert!(text.contains("og 1-150"));
        assert!(text.contains("CCT: 5124K"));
        assert!(text.contains("<polyline"));

        std::fs::remove_file(&dest).ok();
    }

    #[test]
    fn multi_point_charts_carry_labels_in_order() {
        let dest = scratch("evol.svg");
        let spec = ChartSpec {
            points: vec![
                ("og 1-150".to_string(), (0.3418, 0.3518)),
                ("sw45 2-400".to_string(), (0.3604, 0.3339)),
            ],
            bounds: Bounds {
                x_min: 0.32,
                x_max: 0.42,
                y_min: 0.32,
                y_max: 0.42,
            },
            title: Some("TS10".to_string()),
        };
        render_svg(&spec, &dest).unwrap();

        let text = std::fs::read_to_string(&dest).unwrap();
        let first = text.find("og 1-150").unwrap();
        let second = text.find("sw45 2-400").unwrap();
        assert!(first < second);

        std::fs::remove_file(&dest).ok();
    }

    #[test]
    fn png_frame_has_the_frame_dimensions() {
        let dest = scratch("frame.png");
        let spec = ChartSpec {
            points: vec![("og 1-150".to_string(), (0.3418, 0.3518))],
            bounds: Bounds {
                x_min: 0.30,
                x_max: 0.40,
                y_min: 0.30,
                y_max: 0.40,
            },
            title: Some("TS10".to_string()),
        };
        render_png(&spec, &dest).unwrap();

        let decoded = image::open(&dest).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), FRAME_SIZE);

        std::fs::remove_file(&dest).ok();
    }
}
