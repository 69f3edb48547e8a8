// Sweep over candidate cluster counts.
//
// For each k in the requested range, fit a seeded k-means and score the
// resulting labels with all three quality metrics against the same dense
// matrix. The matrix is densified once before the loop; per-iteration
// densification would give bit-identical scores, just slower.

use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::KMeans;
use ndarray::Array2;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use serde::Serialize;
use tracing::info;

use super::matrix::FeatureMatrix;
use super::metrics;
use crate::error::{Error, Result};

/// Score series from a k sweep, parallel by index: entry `i` holds the
/// scores for `ks[i]`.
#[derive(Debug, Clone, Serialize)]
pub struct KSweep {
    pub ks: Vec<usize>,
    /// Higher is better, [-1, 1]
    pub silhouette: Vec<f64>,
    /// Higher is better, >= 0
    pub calinski_harabasz: Vec<f64>,
    /// Lower is better, >= 0
    pub davies_bouldin: Vec<f64>,
}

impl KSweep {
    /// The best k according to each metric: (silhouette, Calinski-Harabasz,
    /// Davies-Bouldin). The three rarely agree exactly; disagreement is
    /// itself a finding.
    pub fn best_k(&self) -> (usize, usize, usize) {
        let argbest = |scores: &[f64], higher_better: bool| -> usize {
            let mut best = 0;
            for (i, &score) in scores.iter().enumerate() {
                let better = if higher_better {
                    score > scores[best]
                } else {
                    score < scores[best]
                };
                if better {
                    best = i;
                }
            }
            self.ks[best]
        };
        (
            argbest(&self.silhouette, true),
            argbest(&self.calinski_harabasz, true),
            argbest(&self.davies_bouldin, false),
        )
    }
}

/// Fit seeded k-means for one k and return per-row cluster labels.
pub fn kmeans_labels(dense: &Array2<f64>, k: usize, random_state: u64) -> Result<Vec<usize>> {
    let rng = Xoshiro256Plus::seed_from_u64(random_state);
    let dataset = DatasetBase::from(dense.clone());

    let model = KMeans::params_with_rng(k, rng)
        .max_n_iterations(300)
        .tolerance(1e-5)
        .fit(&dataset)
        .map_err(|e| Error::Clustering(format!("k-means failed for k={k}: {e}")))?;

    Ok(model.predict(dense).into_iter().collect())
}

/// Run the sweep for every k in `[start_k, end_k]`.
///
/// Fails with [`Error::InvalidRange`] unless `end_k >= start_k >= 2` — the
/// metrics are undefined for fewer than 2 clusters. Deterministic for a
/// fixed `random_state`.
pub fn sweep_k(
    matrix: &FeatureMatrix,
    start_k: usize,
    end_k: usize,
    random_state: u64,
) -> Result<KSweep> {
    if start_k < 2 || end_k < start_k {
        return Err(Error::InvalidRange { start_k, end_k });
    }

    // Densify once, outside the loop
    let dense = matrix.to_dense();

    let mut sweep = KSweep {
        ks: Vec::new(),
        silhouette: Vec::new(),
        calinski_harabasz: Vec::new(),
        davies_bouldin: Vec::new(),
    };

    for k in start_k..=end_k {
        let labels = kmeans_labels(&dense, k, random_state)?;

        let sil = metrics::silhouette(&dense, &labels);
        let ch = metrics::calinski_harabasz(&dense, &labels);
        let db = metrics::davies_bouldin(&dense, &labels);
        info!(k, silhouette = sil, calinski_harabasz = ch, davies_bouldin = db, "Scored k");

        sweep.ks.push(k);
        sweep.silhouette.push(sil);
        sweep.calinski_harabasz.push(ch);
        sweep.davies_bouldin.push(db);
    }

    Ok(sweep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    // Three well-separated blobs of four points each
    fn blobs() -> FeatureMatrix {
        let centers = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)];
        let offsets = [(0.0, 0.0), (0.2, 0.0), (0.0, 0.2), (0.2, 0.2)];
        let mut data = Array2::zeros((12, 2));
        for (b, &(cx, cy)) in centers.iter().enumerate() {
            for (o, &(ox, oy)) in offsets.iter().enumerate() {
                data[[b * 4 + o, 0]] = cx + ox;
                data[[b * 4 + o, 1]] = cy + oy;
            }
        }
        FeatureMatrix::from(data)
    }

    #[test]
    fn range_guards() {
        let m = blobs();
        assert!(matches!(
            sweep_k(&m, 5, 2, 0).unwrap_err(),
            Error::InvalidRange { start_k: 5, end_k: 2 }
        ));
        assert!(matches!(
            sweep_k(&m, 1, 4, 0).unwrap_err(),
            Error::InvalidRange { start_k: 1, end_k: 4 }
        ));
    }

    #[test]
    fn series_are_parallel_and_cover_the_range() {
        let sweep = sweep_k(&blobs(), 2, 5, 0).unwrap();
        assert_eq!(sweep.ks, vec![2, 3, 4, 5]);
        assert_eq!(sweep.silhouette.len(), 4);
        assert_eq!(sweep.calinski_harabasz.len(), 4);
        assert_eq!(sweep.davies_bouldin.len(), 4);
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let a = sweep_k(&blobs(), 2, 4, 0).unwrap();
        let b = sweep_k(&blobs(), 2, 4, 0).unwrap();
        assert_eq!(a.silhouette, b.silhouette);
        assert_eq!(a.calinski_harabasz, b.calinski_harabasz);
        assert_eq!(a.davies_bouldin, b.davies_bouldin);
    }

    #[test]
    fn three_blobs_peak_at_k_three() {
        let sweep = sweep_k(&blobs(), 2, 5, 0).unwrap();
        let (by_sil, _, by_db) = sweep.best_k();
        assert_eq!(by_sil, 3);
        assert_eq!(by_db, 3);
    }
}
