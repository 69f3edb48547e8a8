// Exploration pipeline: cleaned corpus in, sweep scores and plots out.
//
// Vectorizes the cleaned abstracts, runs the k sweep, and (for the
// visualization path) clusters at a chosen k and renders the three-method
// 3-D comparison. The SVG strings come back to the caller; main.rs decides
// where they land on disk.

use tracing::info;

use crate::corpus::vectorize::TfidfVectorizer;
use crate::explore::matrix::FeatureMatrix;
use crate::explore::sweep::{self, KSweep};
use crate::explore::visualize;
use crate::error::Result;
use crate::output::plot;
use crate::pipeline::import::CorpusEntry;

/// Vectorize a cleaned corpus into the explorer's input matrix.
pub fn vectorize(entries: &[CorpusEntry]) -> FeatureMatrix {
    let documents: Vec<String> = entries.iter().map(|e| e.cleaned.clone()).collect();
    let matrix = TfidfVectorizer::default().fit_transform(&documents);
    FeatureMatrix::from(matrix)
}

/// Sweep k over `[start_k, end_k]` and render the score curves.
///
/// Returns the score series and the SVG of the three line charts.
pub fn run_sweep(
    matrix: &FeatureMatrix,
    start_k: usize,
    end_k: usize,
    random_state: u64,
) -> Result<(KSweep, String)> {
    let sweep = sweep::sweep_k(matrix, start_k, end_k, random_state)?;
    let svg = plot::render_sweep_curves(&sweep)?;
    Ok((sweep, svg))
}

/// Cluster at `k` and render the three-method 3-D scatter comparison.
pub fn run_visualize(matrix: &FeatureMatrix, k: usize, random_state: u64) -> Result<String> {
    let dense = matrix.to_dense();
    let labels = sweep::kmeans_labels(&dense, k, random_state)?;
    info!(k, rows = dense.nrows(), "Clustered for visualization");
    visualize::visualize_3d(matrix, &labels, "cluster", k)
}
