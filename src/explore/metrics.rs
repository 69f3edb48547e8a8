// Cluster-quality metrics.
//
// Three independent scores over the same (data, labels) pair:
//   silhouette           — higher is better, range [-1, 1]
//   Calinski-Harabasz    — higher is better, >= 0
//   Davies-Bouldin       — lower is better, >= 0
//
// All three are computed against the dense matrix with euclidean distances.
// None of them is defined for fewer than 2 clusters; callers guard that.

use ndarray::{Array1, Array2, ArrayView1, Axis};

fn euclidean(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

fn n_clusters(labels: &[usize]) -> usize {
    labels.iter().copied().max().map_or(0, |m| m + 1)
}

/// Per-cluster centroids and member counts.
fn centroids(data: &Array2<f64>, labels: &[usize], k: usize) -> (Array2<f64>, Vec<usize>) {
    let mut sums = Array2::zeros((k, data.ncols()));
    let mut counts = vec![0usize; k];
    for (i, &label) in labels.iter().enumerate() {
        let mut row = sums.row_mut(label);
        row += &data.row(i);
        counts[label] += 1;
    }
    for (label, &count) in counts.iter().enumerate() {
        if count > 0 {
            let mut row = sums.row_mut(label);
            row /= count as f64;
        }
    }
    (sums, counts)
}

/// Mean silhouette coefficient over all points.
///
/// For each point: `a` is the mean distance to the rest of its own cluster,
/// `b` the smallest mean distance to any other cluster, and the coefficient
/// is `(b - a) / max(a, b)`. Points alone in their cluster contribute 0.
pub fn silhouette(data: &Array2<f64>, labels: &[usize]) -> f64 {
    let n = data.nrows();
    let k = n_clusters(labels);
    if k < 2 || n < 2 {
        return 0.0;
    }

    let counts = {
        let mut counts = vec![0usize; k];
        for &label in labels {
            counts[label] += 1;
        }
        counts
    };

    let mut total = 0.0;
    for i in 0..n {
        let own = labels[i];
        if counts[own] <= 1 {
            continue; // singleton contributes 0
        }

        // Sum of distances from point i to each cluster
        let mut sums = vec![0.0; k];
        for j in 0..n {
            if i != j {
                sums[labels[j]] += euclidean(data.row(i), data.row(j));
            }
        }

        let a = sums[own] / (counts[own] - 1) as f64;
        let b = (0..k)
            .filter(|&c| c != own && counts[c] > 0)
            .map(|c| sums[c] / counts[c] as f64)
            .fold(f64::INFINITY, f64::min);

        if b.is_finite() {
            let denom = a.max(b);
            if denom > 0.0 {
                total += (b - a) / denom;
            }
        }
    }

    total / n as f64
}

/// Calinski-Harabasz index: between-cluster dispersion over within-cluster
/// dispersion, scaled by the degrees of freedom.
pub fn calinski_harabasz(data: &Array2<f64>, labels: &[usize]) -> f64 {
    let n = data.nrows();
    let k = n_clusters(labels);
    if k < 2 || n <= k {
        return 0.0;
    }

    let (means, counts) = centroids(data, labels, k);
    let overall: Array1<f64> = data.mean_axis(Axis(0)).unwrap();

    let between: f64 = (0..k)
        .map(|c| {
            let d = euclidean(means.row(c), overall.view());
            counts[c] as f64 * d * d
        })
        .sum();

    let within: f64 = (0..n)
        .map(|i| {
            let d = euclidean(data.row(i), means.row(labels[i]));
            d * d
        })
        .sum();

    if within == 0.0 {
        return 0.0;
    }

    (between / (k - 1) as f64) / (within / (n - k) as f64)
}

/// Davies-Bouldin index: mean over clusters of the worst-case similarity
/// `(s_i + s_j) / d_ij`, where `s` is mean distance-to-centroid and `d` the
/// centroid separation.
pub fn davies_bouldin(data: &Array2<f64>, labels: &[usize]) -> f64 {
    let n = data.nrows();
    let k = n_clusters(labels);
    if k < 2 || n == 0 {
        return 0.0;
    }

    let (means, counts) = centroids(data, labels, k);

    // Mean scatter within each cluster
    let mut scatter = vec![0.0; k];
    for (i, &label) in labels.iter().enumerate() {
        scatter[label] += euclidean(data.row(i), means.row(label));
    }
    for (label, &count) in counts.iter().enumerate() {
        if count > 0 {
            scatter[label] /= count as f64;
        }
    }

    let mut total = 0.0;
    for i in 0..k {
        let mut worst: f64 = 0.0;
        for j in 0..k {
            if i == j {
                continue;
            }
            let separation = euclidean(means.row(i), means.row(j));
            if separation > 0.0 {
                worst = worst.max((scatter[i] + scatter[j]) / separation);
            }
        }
        total += worst;
    }

    total / k as f64
}
