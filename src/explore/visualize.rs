// Side-by-side 3-D cluster visualization.
//
// Runs all three reduction methods at three components with the fixed
// hyperparameters the exploration workflow settled on (t-SNE at perplexity
// 30 with random init, UMAP at 15 neighbors / 0.1 min_dist), then renders
// one scatter panel per method, all colored by the same cluster labels.
// The panels share nothing but the labels — each method's axes are its own.

use tracing::info;

use super::matrix::FeatureMatrix;
use super::reduce::{reduce, Method, ReduceOptions};
use crate::error::{Error, Result};
use crate::output::plot;

/// Render the three-method 3-D scatter comparison as an SVG string.
///
/// `cluster_labels` must have one entry per matrix row. `best_k` is the
/// cluster count the labels came from; it only annotates the panel titles.
pub fn visualize_3d(
    matrix: &FeatureMatrix,
    cluster_labels: &[usize],
    label_name: &str,
    best_k: usize,
) -> Result<String> {
    if cluster_labels.len() != matrix.nrows() {
        return Err(Error::LabelShapeMismatch {
            labels: cluster_labels.len(),
            rows: matrix.nrows(),
        });
    }

    let options = ReduceOptions {
        perplexity: 30.0,
        n_neighbors: 15,
        min_dist: 0.1,
        ..Default::default()
    };

    let mut panels = Vec::with_capacity(3);
    for method in [Method::Pca, Method::Tsne, Method::Umap] {
        let coords = reduce(method, matrix, 3, &options)?;
        panels.push((format!("{method} Clustering (k={best_k})"), coords));
    }
    info!(rows = matrix.nrows(), best_k, "Rendering 3-D cluster panels");

    plot::render_reduction_panels(&panels, cluster_labels, label_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn renders_for_valid_inputs() {
        let data = Array2::from_shape_fn((10, 5), |(i, j)| ((i * 7 + j * 3) % 11) as f64);
        let matrix = FeatureMatrix::from(data);
        let labels = vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
        let svg = visualize_3d(&matrix, &labels, "cluster", 2).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("UMAP Clustering"));
    }

    #[test]
    fn label_length_mismatch_is_an_error() {
        let matrix = FeatureMatrix::from(Array2::<f64>::zeros((4, 3)));
        let err = visualize_3d(&matrix, &[0, 1], "cluster", 2).unwrap_err();
        assert!(matches!(
            err,
            Error::LabelShapeMismatch { labels: 2, rows: 4 }
        ));
    }
}
