// Feature matrix input to the explorer.
//
// The explorer never produces this matrix — it arrives from a vectorization
// step (ours or anyone else's) and is treated as read-only. Sparse input is
// densified exactly once per analysis; the reducers and metrics all work on
// the dense form.

use ndarray::Array2;
use sprs::CsMat;

/// A documents × features matrix, dense or sparse.
#[derive(Debug, Clone)]
pub enum FeatureMatrix {
    Dense(Array2<f64>),
    Sparse(CsMat<f64>),
}

impl FeatureMatrix {
    /// Number of documents (rows).
    pub fn nrows(&self) -> usize {
        match self {
            FeatureMatrix::Dense(m) => m.nrows(),
            FeatureMatrix::Sparse(m) => m.rows(),
        }
    }

    /// Number of features (columns).
    pub fn ncols(&self) -> usize {
        match self {
            FeatureMatrix::Dense(m) => m.ncols(),
            FeatureMatrix::Sparse(m) => m.cols(),
        }
    }

    /// Densify. A no-op copy for already-dense input.
    pub fn to_dense(&self) -> Array2<f64> {
        match self {
            FeatureMatrix::Dense(m) => m.clone(),
            FeatureMatrix::Sparse(m) => m.to_dense(),
        }
    }
}

impl From<Array2<f64>> for FeatureMatrix {
    fn from(m: Array2<f64>) -> Self {
        FeatureMatrix::Dense(m)
    }
}

impl From<CsMat<f64>> for FeatureMatrix {
    fn from(m: CsMat<f64>) -> Self {
        FeatureMatrix::Sparse(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprs::TriMat;

    #[test]
    fn sparse_and_dense_agree_after_densify() {
        let mut tri = TriMat::new((2, 3));
        tri.add_triplet(0, 1, 2.5);
        tri.add_triplet(1, 2, -1.0);
        let sparse = FeatureMatrix::from(tri.to_csr());

        let mut dense = Array2::zeros((2, 3));
        dense[[0, 1]] = 2.5;
        dense[[1, 2]] = -1.0;

        assert_eq!(sparse.nrows(), 2);
        assert_eq!(sparse.ncols(), 3);
        assert_eq!(sparse.to_dense(), dense);
    }
}
