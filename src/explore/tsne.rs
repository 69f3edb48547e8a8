// t-SNE (t-distributed stochastic neighbor embedding), exact-gradient form.
//
// No registry crate in our stack covers t-SNE, so this is a native
// implementation of the standard algorithm: per-point bandwidths found by
// binary search against the target perplexity, symmetrized affinities with
// early exaggeration, and momentum gradient descent on the low-dimensional
// layout. O(n^2) per iteration, which is fine at corpus-exploration sizes.

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

/// t-SNE hyperparameters.
#[derive(Debug, Clone)]
pub struct TsneParams {
    pub n_components: usize,
    pub perplexity: f64,
    pub learning_rate: f64,
    pub n_iter: usize,
    pub seed: u64,
}

impl Default for TsneParams {
    fn default() -> Self {
        Self {
            n_components: 2,
            perplexity: 30.0,
            learning_rate: 200.0,
            n_iter: 500,
            seed: 0,
        }
    }
}

const EARLY_EXAGGERATION: f64 = 12.0;
const EXAGGERATION_ITERS: usize = 100;
const MOMENTUM_SWITCH_ITER: usize = 250;
const MIN_PROB: f64 = 1e-12;

/// Embed `data` into `params.n_components` dimensions.
///
/// Output shape is rows × n_components. Axes carry no meaning beyond
/// relative point placement.
pub fn embed(data: &Array2<f64>, params: &TsneParams) -> Array2<f64> {
    let n = data.nrows();
    let dims = params.n_components;
    if n == 0 {
        return Array2::zeros((0, dims));
    }
    if n == 1 {
        return Array2::zeros((1, dims));
    }

    // Perplexity cannot exceed what n-1 neighbors can support
    let max_perplexity = ((n - 1) as f64 / 3.0).max(1.0);
    let perplexity = params.perplexity.min(max_perplexity);
    if perplexity < params.perplexity {
        debug!(
            requested = params.perplexity,
            effective = perplexity,
            "Perplexity clamped for small input"
        );
    }

    let p = joint_affinities(data, perplexity);

    // Tiny gaussian initial layout
    let mut rng = StdRng::seed_from_u64(params.seed);
    let normal = Normal::new(0.0, 1e-4).unwrap();
    let mut y: Array2<f64> = Array2::from_shape_fn((n, dims), |_| normal.sample(&mut rng));
    let mut velocity = Array2::<f64>::zeros((n, dims));

    for iter in 0..params.n_iter {
        let exaggeration = if iter < EXAGGERATION_ITERS {
            EARLY_EXAGGERATION
        } else {
            1.0
        };
        let momentum = if iter < MOMENTUM_SWITCH_ITER { 0.5 } else { 0.8 };

        // Student-t kernel over the current layout
        let mut numerators = Array2::<f64>::zeros((n, n));
        let mut q_sum = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let d2: f64 = y
                    .row(i)
                    .iter()
                    .zip(y.row(j).iter())
                    .map(|(a, b)| (a - b).powi(2))
                    .sum();
                let num = 1.0 / (1.0 + d2);
                numerators[[i, j]] = num;
                numerators[[j, i]] = num;
                q_sum += 2.0 * num;
            }
        }

        // Gradient: 4 * sum_j (p_ij - q_ij) * num_ij * (y_i - y_j)
        let mut grad = Array2::<f64>::zeros((n, dims));
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let q = (numerators[[i, j]] / q_sum).max(MIN_PROB);
                let coeff = 4.0 * (exaggeration * p[[i, j]] - q) * numerators[[i, j]];
                for d in 0..dims {
                    grad[[i, d]] += coeff * (y[[i, d]] - y[[j, d]]);
                }
            }
        }

        velocity = momentum * &velocity - params.learning_rate * &grad;
        y += &velocity;

        // Keep the layout centered
        let mean = y.mean_axis(Axis(0)).unwrap();
        for mut row in y.rows_mut() {
            row -= &mean;
        }
    }

    y
}

/// Symmetrized joint affinities P from the high-dimensional distances.
fn joint_affinities(data: &Array2<f64>, perplexity: f64) -> Array2<f64> {
    let n = data.nrows();
    let mut sq_dist = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let d2: f64 = data
                .row(i)
                .iter()
                .zip(data.row(j).iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum();
            sq_dist[[i, j]] = d2;
            sq_dist[[j, i]] = d2;
        }
    }

    let target_entropy = perplexity.ln();
    let mut p = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        let row = conditional_row(&sq_dist.row(i).to_owned(), i, target_entropy);
        p.row_mut(i).assign(&row);
    }

    // Symmetrize and normalize so the whole matrix sums to 1
    let p_t = p.t().to_owned();
    let mut joint = &p + &p_t;
    joint /= 2.0 * n as f64;
    joint.mapv_inplace(|v| v.max(MIN_PROB));
    for i in 0..n {
        joint[[i, i]] = MIN_PROB;
    }
    joint
}

/// Binary search the bandwidth (precision beta) for one point so the
/// conditional distribution hits the target entropy, then return that row
/// of conditional probabilities.
fn conditional_row(sq_dist: &Array1<f64>, i: usize, target_entropy: f64) -> Array1<f64> {
    let n = sq_dist.len();
    let mut beta = 1.0;
    let mut beta_min = f64::NEG_INFINITY;
    let mut beta_max = f64::INFINITY;
    let mut probs = Array1::<f64>::zeros(n);

    for _ in 0..50 {
        let mut sum = 0.0;
        for j in 0..n {
            probs[j] = if j == i {
                0.0
            } else {
                (-beta * sq_dist[j]).exp()
            };
            sum += probs[j];
        }
        if sum <= 0.0 {
            sum = MIN_PROB;
        }

        // H = sum p log(1/p), computed from the unnormalized form
        let mut entropy = 0.0;
        for j in 0..n {
            probs[j] /= sum;
            if probs[j] > MIN_PROB {
                entropy -= probs[j] * probs[j].ln();
            }
        }

        let diff = entropy - target_entropy;
        if diff.abs() < 1e-5 {
            break;
        }
        if diff > 0.0 {
            // Distribution too flat — sharpen
            beta_min = beta;
            beta = if beta_max.is_finite() {
                (beta + beta_max) / 2.0
            } else {
                beta * 2.0
            };
        } else {
            beta_max = beta;
            beta = if beta_min.is_finite() {
                (beta + beta_min) / 2.0
            } else {
                beta / 2.0
            };
        }
    }

    probs
}
