// Error taxonomy for the import and exploration pipelines.
//
// Importer-side conditions (missing directory, oversized sample) are things
// a batch caller checks and routes around; document and configuration errors
// (malformed XML, unknown reduction method, bad k range) indicate a contract
// violation by the caller and should propagate.

use std::path::PathBuf;

use thiserror::Error;

/// All error conditions surfaced by the loess library.
#[derive(Debug, Error)]
pub enum Error {
    /// The corpus directory does not exist.
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// A sample was requested that is larger than the population it is
    /// drawn from. Unreachable for proportions <= 1.0; guards misuse with
    /// a proportion above 1.
    #[error("sample size {requested} exceeds population size {population}")]
    SampleSizeExceedsPopulation {
        requested: usize,
        population: usize,
    },

    /// A source file could not be parsed as well-formed XML.
    #[error("malformed document {path}: {source}")]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// A reduction method name outside the supported set.
    #[error("unsupported reduction method: {0} (expected PCA, t-SNE, or UMAP)")]
    UnsupportedMethod(String),

    /// A k sweep range that is empty or starts below 2 clusters.
    #[error("invalid k range [{start_k}, {end_k}]: need end_k >= start_k >= 2")]
    InvalidRange { start_k: usize, end_k: usize },

    /// The label array handed to a visualization does not match the matrix.
    #[error("label count {labels} does not match row count {rows}")]
    LabelShapeMismatch { labels: usize, rows: usize },

    /// Filesystem failure while reading the corpus.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// k-means failed to converge on a fit.
    #[error("clustering failed: {0}")]
    Clustering(String),

    /// A reduction could not be computed (e.g. more components than the
    /// matrix supports).
    #[error("reduction failed: {0}")]
    Reduction(String),

    /// Plot rendering failed.
    #[error("plot rendering failed: {0}")]
    Plot(String),
}

/// Library-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
