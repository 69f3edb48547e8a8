// TF-IDF vectorization of cleaned abstracts.
//
// This is the collaborator that feeds the cluster explorer: each cleaned
// abstract becomes one row of a sparse document-term matrix. Terms are
// whitespace tokens (the cleaner already lowercased and stripped everything
// else), English stop words are dropped, IDF is smoothed, and rows are
// L2-normalized so euclidean distances downstream behave like cosine.

use std::collections::{BTreeMap, HashMap, HashSet};

use sprs::{CsMat, TriMat};
use stop_words::{get, LANGUAGE};
use tracing::info;

/// TF-IDF document-term vectorizer.
pub struct TfidfVectorizer {
    /// Drop terms appearing in fewer than this many documents
    pub min_df: usize,
    /// Filter English stop words before counting
    pub filter_stop_words: bool,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self {
            min_df: 2,
            filter_stop_words: true,
        }
    }
}

impl TfidfVectorizer {
    /// Build the document-term matrix for a cleaned corpus.
    ///
    /// Rows follow document order; columns follow alphabetical term order,
    /// so the same corpus always vectorizes to the same matrix. Documents
    /// with no surviving terms become all-zero rows.
    pub fn fit_transform(&self, documents: &[String]) -> CsMat<f64> {
        let stop: HashSet<String> = if self.filter_stop_words {
            get(LANGUAGE::English).into_iter().collect()
        } else {
            HashSet::new()
        };

        // Per-document term counts
        let doc_counts: Vec<HashMap<&str, usize>> = documents
            .iter()
            .map(|doc| {
                let mut counts = HashMap::new();
                for token in doc.split_whitespace() {
                    if !stop.contains(token) {
                        *counts.entry(token).or_insert(0) += 1;
                    }
                }
                counts
            })
            .collect();

        // Document frequency per term, then the vocabulary that survives min_df.
        // BTreeMap gives alphabetical (deterministic) column assignment.
        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for counts in &doc_counts {
            for term in counts.keys() {
                *df.entry(term).or_insert(0) += 1;
            }
        }
        let vocab: BTreeMap<&str, usize> = df
            .iter()
            .filter(|(_, &freq)| freq >= self.min_df)
            .enumerate()
            .map(|(col, (&term, _))| (term, col))
            .collect();

        let n_docs = documents.len();
        let n_terms = vocab.len();
        info!(documents = n_docs, terms = n_terms, "Vectorized corpus");

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1
        let idf: Vec<f64> = {
            let mut idf = vec![0.0; n_terms];
            for (term, &col) in &vocab {
                let freq = df[term] as f64;
                idf[col] = ((1.0 + n_docs as f64) / (1.0 + freq)).ln() + 1.0;
            }
            idf
        };

        let mut tri = TriMat::new((n_docs, n_terms));
        for (row, counts) in doc_counts.iter().enumerate() {
            // Raw tf * idf, then L2 normalize the row
            let mut entries: Vec<(usize, f64)> = counts
                .iter()
                .filter_map(|(term, &count)| {
                    vocab.get(term).map(|&col| (col, count as f64 * idf[col]))
                })
                .collect();

            let norm: f64 = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, v) in entries.iter_mut() {
                    *v /= norm;
                }
            }

            for (col, value) in entries {
                tri.add_triplet(row, col, value);
            }
        }

        tri.to_csr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "soil carbon flux measurement field sites".to_string(),
            "soil microbial carbon cycling dynamics".to_string(),
            "quantum error correction surface codes".to_string(),
            "quantum computing error mitigation hardware".to_string(),
        ]
    }

    #[test]
    fn shape_matches_corpus() {
        let matrix = TfidfVectorizer::default().fit_transform(&corpus());
        assert_eq!(matrix.rows(), 4);
        // min_df=2 keeps only terms in >=2 docs: soil, carbon, quantum, error
        assert_eq!(matrix.cols(), 4);
    }

    #[test]
    fn rows_are_unit_norm() {
        let matrix = TfidfVectorizer::default().fit_transform(&corpus());
        let dense = matrix.to_dense();
        for row in dense.outer_iter() {
            let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9, "row norm {norm}");
        }
    }

    #[test]
    fn empty_document_is_zero_row() {
        let mut docs = corpus();
        docs.push(String::new());
        let matrix = TfidfVectorizer::default().fit_transform(&docs);
        let dense = matrix.to_dense();
        assert!(dense.row(4).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn deterministic_across_calls() {
        let a = TfidfVectorizer::default().fit_transform(&corpus());
        let b = TfidfVectorizer::default().fit_transform(&corpus());
        assert_eq!(a.to_dense(), b.to_dense());
    }
}
