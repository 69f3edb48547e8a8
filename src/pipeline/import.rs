// Corpus import pipeline: list, sample, extract, clean.
//
// Directory-level problems (missing directory, bad sample size) abort the
// run; a single malformed file does not. The batch loop warns and skips it,
// so one stray non-XML file in the corpus directory costs one record, not
// the whole import.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::corpus::clean::clean;
use crate::corpus::importer;
use crate::corpus::record::extract_record;
use crate::error::Result;

/// One imported document: raw extracted fields plus the cleaned text that
/// feeds vectorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusEntry {
    /// File name within the corpus directory
    pub file: String,
    pub title: String,
    pub abstract_text: String,
    /// Normalized abstract, ready for the vectorizer
    pub cleaned: String,
}

/// Run the import pipeline over `dir`, sampling `proportion` of its files.
///
/// Returns one entry per successfully parsed document, in sample order.
pub fn run<R: Rng + ?Sized>(
    dir: &Path,
    proportion: f64,
    rng: &mut R,
) -> Result<Vec<CorpusEntry>> {
    let all_files = importer::list_files(dir)?;
    info!(total = all_files.len(), "Listed corpus directory");

    let sampled = importer::sample(&all_files, proportion, rng)?;
    println!(
        "Importing {} of {} files ({}%)...",
        sampled.len(),
        all_files.len(),
        (proportion * 100.0).round(),
    );

    let pb = ProgressBar::new(sampled.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Import [{bar:30}] {pos}/{len} ({eta})")
            .unwrap(),
    );

    let mut entries = Vec::with_capacity(sampled.len());
    for file in &sampled {
        match extract_record(&dir.join(file)) {
            Ok(record) => {
                let cleaned = clean(&record.abstract_text);
                entries.push(CorpusEntry {
                    file: file.clone(),
                    title: record.title,
                    abstract_text: record.abstract_text,
                    cleaned,
                });
            }
            Err(e) => {
                warn!(file, error = %e, "Failed to parse document, skipping");
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        imported = entries.len(),
        skipped = sampled.len() - entries.len(),
        "Import finished"
    );

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;

    #[test]
    fn skips_malformed_files_and_keeps_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..4 {
            fs::write(
                dir.path().join(format!("award_{i}.xml")),
                format!(
                    "<Award><AwardTitle>Grant {i}</AwardTitle>\
                     <AbstractNarration>Abstract {i} text.</AbstractNarration></Award>"
                ),
            )
            .unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "not xml").unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        let entries = run(dir.path(), 1.0, &mut rng).unwrap();

        // All 5 files sampled, the .txt one skipped at extraction
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| e.file.ends_with(".xml")));
        assert!(entries.iter().all(|e| e.cleaned.starts_with("abstract")));
    }

    #[test]
    fn missing_directory_aborts() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = run(Path::new("/definitely/not/here"), 0.8, &mut rng).unwrap_err();
        assert!(matches!(err, crate::error::Error::DirectoryNotFound(_)));
    }
}
