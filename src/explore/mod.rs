// Cluster exploration — dimensionality reduction, quality metrics, and the
// k sweep over candidate cluster counts.

pub mod matrix;
pub mod metrics;
pub mod reduce;
pub mod sweep;
pub mod tsne;
pub mod umap;
pub mod visualize;
