// Directory listing and random sampling for the corpus importer.
//
// `list_files` enumerates the regular files of a directory (no recursion,
// subdirectories excluded) and sorts them by name so a seeded import is
// reproducible. `sample` draws a fixed proportion of those names uniformly
// without replacement from a caller-supplied rng — callers that need
// reproducible draws pass a seeded one.

use std::fs;
use std::path::Path;

use rand::seq::index;
use rand::Rng;

use crate::error::{Error, Result};

/// List every regular file directly under `path`, sorted by name.
///
/// Fails with [`Error::DirectoryNotFound`] when the path does not exist.
/// Entries are not filtered by extension — a stray `.txt` in an XML corpus
/// shows up here and fails later, at extraction.
pub fn list_files(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::DirectoryNotFound(path.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();

    Ok(names)
}

/// Draw `floor(len * proportion)` names uniformly without replacement.
///
/// The remainder of the list is discarded. Fails with
/// [`Error::SampleSizeExceedsPopulation`] when the computed sample size
/// exceeds the population — only reachable when `proportion > 1.0`.
pub fn sample<R: Rng + ?Sized>(
    full_list: &[String],
    proportion: f64,
    rng: &mut R,
) -> Result<Vec<String>> {
    let n = (full_list.len() as f64 * proportion).floor() as usize;

    if n > full_list.len() {
        return Err(Error::SampleSizeExceedsPopulation {
            requested: n,
            population: full_list.len(),
        });
    }

    let selected = index::sample(rng, full_list.len(), n)
        .into_iter()
        .map(|i| full_list[i].clone())
        .collect();

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("award_{i:03}.xml")).collect()
    }

    #[test]
    fn sample_size_is_floor_of_proportion() {
        let list = names(10);
        let mut rng = StdRng::seed_from_u64(7);
        let out = sample(&list, 0.8, &mut rng).unwrap();
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn sample_full_proportion_is_permutation() {
        let list = names(5);
        let mut rng = StdRng::seed_from_u64(7);
        let mut out = sample(&list, 1.0, &mut rng).unwrap();
        out.sort();
        assert_eq!(out, list);
    }

    #[test]
    fn sample_elements_are_distinct_and_from_population() {
        let list = names(20);
        let mut rng = StdRng::seed_from_u64(42);
        let out = sample(&list, 0.5, &mut rng).unwrap();
        assert_eq!(out.len(), 10);
        let mut seen = std::collections::HashSet::new();
        for name in &out {
            assert!(list.contains(name));
            assert!(seen.insert(name), "duplicate draw: {name}");
        }
    }

    #[test]
    fn sample_guard_fires_for_proportion_above_one() {
        let list = names(4);
        let mut rng = StdRng::seed_from_u64(0);
        let err = sample(&list, 1.5, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            Error::SampleSizeExceedsPopulation {
                requested: 6,
                population: 4
            }
        ));
    }

    #[test]
    fn sample_seeded_is_reproducible() {
        let list = names(30);
        let a = sample(&list, 0.6, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = sample(&list, 0.6, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }
}
