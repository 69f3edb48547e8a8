// SVG plot rendering via plotters.
//
// Everything here renders into an in-memory SVG string and returns it —
// writing to disk is the caller's decision, never the library's. Two
// renderers: the three-panel 3-D scatter (one panel per reduction method)
// and the three-panel score-vs-k line charts for a sweep.

use ndarray::Array2;
use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::explore::sweep::KSweep;

const PANEL_WIDTH: u32 = 600;
const PANEL_HEIGHT: u32 = 600;

fn plot_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Plot(e.to_string())
}

/// Axis range with a little padding, tolerant of flat data.
fn padded_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return -1.0..1.0;
    }
    let pad = ((hi - lo) * 0.05).max(0.5);
    (lo - pad)..(hi + pad)
}

/// Render side-by-side 3-D scatter panels, one per (title, coordinates)
/// pair, all colored by the same cluster labels. The legend on each panel
/// is keyed by `label_name`.
pub fn render_reduction_panels(
    panels: &[(String, Array2<f64>)],
    labels: &[usize],
    label_name: &str,
) -> Result<String> {
    let mut svg = String::new();
    {
        let width = PANEL_WIDTH * panels.len() as u32;
        let root = SVGBackend::with_string(&mut svg, (width, PANEL_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;
        let areas = root.split_evenly((1, panels.len()));

        for ((title, coords), area) in panels.iter().zip(areas.iter()) {
            let x_range = padded_range(coords.column(0).iter().copied());
            let y_range = padded_range(coords.column(1).iter().copied());
            let z_range = padded_range(coords.column(2).iter().copied());

            let mut chart = ChartBuilder::on(area)
                .caption(title, ("sans-serif", 24))
                .margin(10)
                .build_cartesian_3d(x_range, y_range, z_range)
                .map_err(plot_err)?;
            chart.configure_axes().draw().map_err(plot_err)?;

            // One series per cluster so each gets a legend entry
            let n_clusters = labels.iter().copied().max().map_or(0, |m| m + 1);
            for cluster in 0..n_clusters {
                let color = Palette99::pick(cluster).mix(0.7);
                chart
                    .draw_series(
                        labels
                            .iter()
                            .enumerate()
                            .filter(|(_, &l)| l == cluster)
                            .map(|(i, _)| {
                                Circle::new(
                                    (coords[[i, 0]], coords[[i, 1]], coords[[i, 2]]),
                                    3,
                                    color.filled(),
                                )
                            }),
                    )
                    .map_err(plot_err)?
                    .label(format!("{label_name} {cluster}"))
                    .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
            }

            chart
                .configure_series_labels()
                .border_style(&BLACK)
                .background_style(&WHITE.mix(0.8))
                .draw()
                .map_err(plot_err)?;
        }

        root.present().map_err(plot_err)?;
    }
    Ok(svg)
}

/// Render the three score-vs-k line charts of a sweep side by side.
pub fn render_sweep_curves(sweep: &KSweep) -> Result<String> {
    let series: [(&str, &[f64]); 3] = [
        ("Silhouette Score", &sweep.silhouette),
        ("Calinski-Harabasz Score", &sweep.calinski_harabasz),
        ("Davies-Bouldin Score", &sweep.davies_bouldin),
    ];

    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (PANEL_WIDTH * 3, 400)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;
        let areas = root.split_evenly((1, 3));

        let k_lo = *sweep.ks.first().unwrap_or(&2) as f64;
        let k_hi = *sweep.ks.last().unwrap_or(&2) as f64;

        for ((title, scores), area) in series.iter().zip(areas.iter()) {
            let y_range = padded_range(scores.iter().copied());

            let mut chart = ChartBuilder::on(area)
                .caption(format!("{title} vs Number of Clusters"), ("sans-serif", 18))
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d((k_lo - 0.5)..(k_hi + 0.5), y_range)
                .map_err(plot_err)?;
            chart
                .configure_mesh()
                .x_desc("Number of Clusters (k)")
                .y_desc(*title)
                .draw()
                .map_err(plot_err)?;

            let points: Vec<(f64, f64)> = sweep
                .ks
                .iter()
                .zip(scores.iter())
                .map(|(&k, &s)| (k as f64, s))
                .collect();

            chart
                .draw_series(LineSeries::new(points.clone(), &BLUE))
                .map_err(plot_err)?;
            chart
                .draw_series(points.iter().map(|&p| Circle::new(p, 3, BLUE.filled())))
                .map_err(plot_err)?;
        }

        root.present().map_err(plot_err)?;
    }
    Ok(svg)
}
