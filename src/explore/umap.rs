// UMAP (uniform manifold approximation and projection).
//
// Native implementation of the reference algorithm, sized for exploratory
// corpora: brute-force k-nearest neighbors, smooth-knn bandwidth search,
// fuzzy set union for the symmetrized graph, and edge-sampled SGD with
// negative sampling on the embedding. The a/b parameters of the output
// kernel are fitted to min_dist with a coarse-to-fine grid search instead
// of a curve-fitting library.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// UMAP hyperparameters.
#[derive(Debug, Clone)]
pub struct UmapParams {
    pub n_components: usize,
    pub n_neighbors: usize,
    pub min_dist: f64,
    pub n_epochs: usize,
    pub seed: u64,
}

impl Default for UmapParams {
    fn default() -> Self {
        Self {
            n_components: 2,
            n_neighbors: 15,
            min_dist: 0.1,
            n_epochs: 200,
            seed: 0,
        }
    }
}

const NEGATIVE_SAMPLES: usize = 5;
const REPULSION_EPS: f64 = 0.001;
const GRAD_CLIP: f64 = 4.0;

/// One undirected edge of the fuzzy graph.
struct Edge {
    a: usize,
    b: usize,
    weight: f64,
}

/// Embed `data` into `params.n_components` dimensions.
///
/// Output shape is rows × n_components; deterministic for a fixed seed.
pub fn embed(data: &Array2<f64>, params: &UmapParams) -> Array2<f64> {
    let n = data.nrows();
    let dims = params.n_components;
    if n == 0 {
        return Array2::zeros((0, dims));
    }
    if n == 1 {
        return Array2::zeros((1, dims));
    }

    let k = params.n_neighbors.min(n - 1).max(2);
    if k < params.n_neighbors {
        debug!(
            requested = params.n_neighbors,
            effective = k,
            "n_neighbors clamped for small input"
        );
    }

    let edges = fuzzy_graph(data, k);
    let (a, b) = fit_ab(params.min_dist);

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut y = Array2::from_shape_fn((n, dims), |_| rng.random_range(-10.0..10.0));

    let max_weight = edges
        .iter()
        .map(|e| e.weight)
        .fold(f64::MIN, f64::max)
        .max(f64::MIN_POSITIVE);

    for epoch in 0..params.n_epochs {
        // Linear learning-rate decay
        let alpha = 1.0 - epoch as f64 / params.n_epochs as f64;

        for edge in &edges {
            // Strong edges update every epoch, weak ones proportionally
            if rng.random::<f64>() > edge.weight / max_weight {
                continue;
            }

            attract(&mut y, edge.a, edge.b, a, b, alpha, dims);

            for _ in 0..NEGATIVE_SAMPLES {
                let other = rng.random_range(0..n);
                if other != edge.a {
                    repel(&mut y, edge.a, other, a, b, alpha, dims);
                }
            }
        }
    }

    y
}

/// Pull the two endpoints of an edge together along the output kernel.
fn attract(y: &mut Array2<f64>, i: usize, j: usize, a: f64, b: f64, alpha: f64, dims: usize) {
    let d2: f64 = (0..dims).map(|d| (y[[i, d]] - y[[j, d]]).powi(2)).sum();
    if d2 <= 0.0 {
        return;
    }
    let coeff = (-2.0 * a * b * d2.powf(b - 1.0)) / (1.0 + a * d2.powf(b));
    for d in 0..dims {
        let step = alpha * (coeff * (y[[i, d]] - y[[j, d]])).clamp(-GRAD_CLIP, GRAD_CLIP);
        y[[i, d]] += step;
        y[[j, d]] -= step;
    }
}

/// Push a point away from a negative sample.
fn repel(y: &mut Array2<f64>, i: usize, j: usize, a: f64, b: f64, alpha: f64, dims: usize) {
    let d2: f64 = (0..dims).map(|d| (y[[i, d]] - y[[j, d]]).powi(2)).sum();
    let coeff = 2.0 * b / ((REPULSION_EPS + d2) * (1.0 + a * d2.powf(b)));
    for d in 0..dims {
        let diff = y[[i, d]] - y[[j, d]];
        let raw = if diff != 0.0 { coeff * diff } else { GRAD_CLIP };
        y[[i, d]] += alpha * raw.clamp(-GRAD_CLIP, GRAD_CLIP);
    }
}

/// Build the symmetrized fuzzy neighbor graph.
fn fuzzy_graph(data: &Array2<f64>, k: usize) -> Vec<Edge> {
    let n = data.nrows();

    // Brute-force k nearest neighbors per point
    let mut neighbors: Vec<Vec<(usize, f64)>> = Vec::with_capacity(n);
    for i in 0..n {
        let mut dists: Vec<(usize, f64)> = (0..n)
            .filter(|&j| j != i)
            .map(|j| {
                let d2: f64 = data
                    .row(i)
                    .iter()
                    .zip(data.row(j).iter())
                    .map(|(x, y)| (x - y).powi(2))
                    .sum();
                (j, d2.sqrt())
            })
            .collect();
        dists.sort_by(|x, y| x.1.total_cmp(&y.1));
        dists.truncate(k);
        neighbors.push(dists);
    }

    // Directed membership strengths via smooth-knn bandwidths
    let target = (k as f64).log2();
    let mut directed = vec![std::collections::HashMap::<usize, f64>::new(); n];
    for i in 0..n {
        let rho = neighbors[i][0].1;
        let sigma = smooth_knn_sigma(&neighbors[i], rho, target);
        for &(j, dist) in &neighbors[i] {
            let w = (-(dist - rho).max(0.0) / sigma).exp();
            directed[i].insert(j, w);
        }
    }

    // Fuzzy set union: w = w_ij + w_ji - w_ij * w_ji, one edge per pair
    let mut edges = Vec::new();
    for i in 0..n {
        for (&j, &w_ij) in &directed[i] {
            if j < i {
                continue; // handled from the other side
            }
            let w_ji = directed[j].get(&i).copied().unwrap_or(0.0);
            let weight = w_ij + w_ji - w_ij * w_ji;
            if weight > 0.0 {
                edges.push(Edge { a: i, b: j, weight });
            }
        }
    }
    // Edges only found from the lower index side
    for i in 0..n {
        for (&j, &w_ji) in &directed[i] {
            if j > i || directed[j].contains_key(&i) {
                continue;
            }
            edges.push(Edge {
                a: j,
                b: i,
                weight: w_ji,
            });
        }
    }

    edges.sort_by(|x, y| (x.a, x.b).cmp(&(y.a, y.b)));
    edges
}

/// Binary search the bandwidth so the membership strengths of one point's
/// neighborhood sum to log2(k).
fn smooth_knn_sigma(neighbors: &[(usize, f64)], rho: f64, target: f64) -> f64 {
    let mut lo = 0.0;
    let mut hi = f64::INFINITY;
    let mut sigma = 1.0;

    for _ in 0..64 {
        let sum: f64 = neighbors
            .iter()
            .map(|&(_, d)| (-(d - rho).max(0.0) / sigma).exp())
            .sum();

        if (sum - target).abs() < 1e-5 {
            break;
        }
        if sum > target {
            hi = sigma;
            sigma = (lo + hi) / 2.0;
        } else {
            lo = sigma;
            sigma = if hi.is_finite() { (lo + hi) / 2.0 } else { sigma * 2.0 };
        }
    }

    sigma.max(1e-12)
}

/// Fit the output kernel parameters (a, b) to min_dist.
///
/// The kernel 1/(1 + a*x^(2b)) should approximate the piecewise target
/// (1 for x <= min_dist, exp(-(x - min_dist)) beyond). Two rounds of grid
/// search get within a couple percent of the reference curve fit.
fn fit_ab(min_dist: f64) -> (f64, f64) {
    let xs: Vec<f64> = (1..=90).map(|i| i as f64 / 30.0).collect();
    let targets: Vec<f64> = xs
        .iter()
        .map(|&x| {
            if x <= min_dist {
                1.0
            } else {
                (-(x - min_dist)).exp()
            }
        })
        .collect();

    let sse = |a: f64, b: f64| -> f64 {
        xs.iter()
            .zip(targets.iter())
            .map(|(&x, &t)| {
                let fitted = 1.0 / (1.0 + a * x.powf(2.0 * b));
                (fitted - t).powi(2)
            })
            .sum()
    };

    let mut best = (1.0, 1.0);
    let mut best_err = f64::INFINITY;
    let mut a_range = (0.05, 10.0);
    let mut b_range = (0.2, 2.5);

    for _ in 0..3 {
        let (a_lo, a_hi) = a_range;
        let (b_lo, b_hi) = b_range;
        for ai in 0..40 {
            let a = a_lo + (a_hi - a_lo) * ai as f64 / 39.0;
            for bi in 0..40 {
                let b = b_lo + (b_hi - b_lo) * bi as f64 / 39.0;
                let err = sse(a, b);
                if err < best_err {
                    best_err = err;
                    best = (a, b);
                }
            }
        }
        // Tighten around the current best for the next round
        let a_step = (a_hi - a_lo) / 39.0;
        let b_step = (b_hi - b_lo) / 39.0;
        a_range = ((best.0 - a_step).max(1e-3), best.0 + a_step);
        b_range = ((best.1 - b_step).max(1e-3), best.1 + b_step);
    }

    best
}
