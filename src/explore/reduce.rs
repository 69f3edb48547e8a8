// Dimensionality reduction dispatch.
//
// Three methods behind one entry point: PCA (linfa-reduction), t-SNE and
// UMAP (native, in sibling modules). The methods share nothing beyond the
// output shape contract — coordinates from one method are not comparable in
// scale or orientation to another's.

use std::fmt;
use std::str::FromStr;

use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_reduction::Pca;
use ndarray::Array2;
use tracing::info;

use super::matrix::FeatureMatrix;
use super::tsne::{self, TsneParams};
use super::umap::{self, UmapParams};
use crate::error::{Error, Result};

/// The closed set of supported reduction methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Pca,
    Tsne,
    Umap,
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PCA" => Ok(Method::Pca),
            "t-SNE" => Ok(Method::Tsne),
            "UMAP" => Ok(Method::Umap),
            other => Err(Error::UnsupportedMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Pca => "PCA",
            Method::Tsne => "t-SNE",
            Method::Umap => "UMAP",
        };
        write!(f, "{name}")
    }
}

/// Method-specific hyperparameters, passed through to whichever reducer
/// runs. Fields irrelevant to the chosen method are ignored.
#[derive(Debug, Clone)]
pub struct ReduceOptions {
    /// t-SNE target perplexity
    pub perplexity: f64,
    /// t-SNE gradient descent step size
    pub learning_rate: f64,
    /// t-SNE iteration count
    pub n_iter: usize,
    /// UMAP neighborhood size
    pub n_neighbors: usize,
    /// UMAP minimum output spacing
    pub min_dist: f64,
    /// UMAP SGD epochs
    pub n_epochs: usize,
    /// Seed for the stochastic methods (PCA ignores it)
    pub seed: u64,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            perplexity: 30.0,
            learning_rate: 200.0,
            n_iter: 500,
            n_neighbors: 15,
            min_dist: 0.1,
            n_epochs: 200,
            seed: 0,
        }
    }
}

/// Project `matrix` down to `n_components` dimensions with `method`.
///
/// The one shape guarantee: the output is rows × n_components.
pub fn reduce(
    method: Method,
    matrix: &FeatureMatrix,
    n_components: usize,
    options: &ReduceOptions,
) -> Result<Array2<f64>> {
    let dense = matrix.to_dense();
    info!(
        method = %method,
        rows = dense.nrows(),
        features = dense.ncols(),
        n_components,
        "Running reduction"
    );

    let result = match method {
        Method::Pca => pca(&dense, n_components)?,
        Method::Tsne => tsne::embed(
            &dense,
            &TsneParams {
                n_components,
                perplexity: options.perplexity,
                learning_rate: options.learning_rate,
                n_iter: options.n_iter,
                seed: options.seed,
            },
        ),
        Method::Umap => umap::embed(
            &dense,
            &UmapParams {
                n_components,
                n_neighbors: options.n_neighbors,
                min_dist: options.min_dist,
                n_epochs: options.n_epochs,
                seed: options.seed,
            },
        ),
    };

    debug_assert_eq!(result.dim(), (matrix.nrows(), n_components));
    Ok(result)
}

fn pca(dense: &Array2<f64>, n_components: usize) -> Result<Array2<f64>> {
    let dataset = DatasetBase::from(dense.clone());
    let model = Pca::params(n_components)
        .fit(&dataset)
        .map_err(|e| Error::Reduction(format!("PCA fit failed: {e}")))?;
    Ok(model.predict(dense))
}
