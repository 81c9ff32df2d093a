//! Line chart of mean elapsed time per section count
//!
//! Only built with the `plot` feature. Without it `render` reports that the
//! plot was skipped.

use eyre::Result;
use std::path::{Path, PathBuf};

use super::summary::Summary;

/// Whether this build can render plots
pub const AVAILABLE: bool = cfg!(feature = "plot");

/// Draw one line per persona count. Returns `None` when plotting is not
/// compiled in.
#[cfg(feature = "plot")]
pub fn render(path: &Path, summary: &Summary) -> Result<Option<PathBuf>> {
    use plotters::prelude::*;

    fn draw_err<E: std::fmt::Display>(e: E) -> eyre::Report {
        eyre::eyre!("Failed to draw plot: {}", e)
    }

    super::writer::ensure_parent(path)?;

    let personas = summary.personas();
    let sections = summary.sections();

    let x_min = sections.first().copied().unwrap_or(1) as f64 - 0.5;
    let x_max = sections.last().copied().unwrap_or(1) as f64 + 0.5;
    let y_top = personas
        .iter()
        .flat_map(|&p| sections.iter().filter_map(move |&s| summary.mean(p, s)))
        .fold(0.0_f64, f64::max);
    let y_max = if y_top > 0.0 { y_top * 1.1 } else { 1.0 };

    let root = SVGBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Storm write performance", ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Number of sections")
        .y_desc("Elapsed time (s)")
        .draw()
        .map_err(draw_err)?;

    for (i, &p) in personas.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        // Pairs without samples are left out of the line
        let points: Vec<(f64, f64)> = sections
            .iter()
            .filter_map(|&s| summary.mean(p, s).map(|mean| (s as f64, mean)))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(draw_err)?
            .label(format!("personas={}", p))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart
            .draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 4, color.filled())))
            .map_err(draw_err)?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    log::info!("Saved plot to {}", path.display());
    Ok(Some(path.to_path_buf()))
}

#[cfg(not(feature = "plot"))]
pub fn render(path: &Path, _summary: &Summary) -> Result<Option<PathBuf>> {
    log::info!("Plot support not compiled in, skipping {}", path.display());
    Ok(None)
}
