// Composition tests — verifying that the two pipelines chain together.
//
// These tests exercise the full data flow:
//   directory -> sample -> extract -> clean -> TF-IDF -> sweep / visualize
// against a small synthetic corpus living in a tempdir. The corpus has two
// obvious topic groups, so the sweep should at least produce sane scores at
// k=2 and the visualization should render without failing.

use std::fs;

use rand::rngs::StdRng;
use rand::SeedableRng;

use loess::explore::sweep::kmeans_labels;
use loess::explore::visualize::visualize_3d;
use loess::pipeline::{explore, import};

fn synthetic_corpus() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();

    let soil = [
        "Soil carbon flux measurements across agricultural field sites reveal seasonal cycling",
        "Microbial communities drive soil carbon dynamics in temperate forest ecosystems",
        "Long term soil monitoring captures carbon storage trends under crop rotation",
        "Soil organic carbon responds to tillage intensity across midwestern farm plots",
        "Carbon cycling in wetland soils depends on microbial respiration and moisture",
        "Field measurements of soil respiration constrain regional carbon budget models",
    ];
    let quantum = [
        "Quantum error correction with surface codes enables fault tolerant computation",
        "Superconducting qubit coherence times limit near term quantum hardware performance",
        "Quantum computing error mitigation strategies improve noisy circuit fidelity",
        "Topological qubits promise hardware level protection against quantum errors",
        "Variational quantum algorithms tolerate moderate noise on current processors",
        "Benchmarking quantum processors requires scalable error characterization protocols",
    ];

    for (i, text) in soil.iter().chain(quantum.iter()).enumerate() {
        fs::write(
            dir.path().join(format!("award_{i:02}.xml")),
            format!(
                "<rootTag><Award><AwardTitle>Award {i}</AwardTitle>\
                 <AbstractNarration>&lt;p&gt;{text}.&lt;/p&gt;</AbstractNarration>\
                 </Award></rootTag>"
            ),
        )
        .unwrap();
    }

    dir
}

#[test]
fn import_then_sweep_produces_scores_for_every_k() {
    let dir = synthetic_corpus();
    let mut rng = StdRng::seed_from_u64(0);

    let entries = import::run(dir.path(), 1.0, &mut rng).unwrap();
    assert_eq!(entries.len(), 12);
    // Cleaning stripped the markup and punctuation
    assert!(entries.iter().all(|e| !e.cleaned.contains('<')));
    assert!(entries.iter().all(|e| !e.cleaned.contains('.')));

    let matrix = explore::vectorize(&entries);
    assert_eq!(matrix.nrows(), 12);

    let (sweep, svg) = explore::run_sweep(&matrix, 2, 4, 0).unwrap();
    assert_eq!(sweep.ks, vec![2, 3, 4]);
    assert!(sweep.silhouette.iter().all(|s| (-1.0..=1.0).contains(s)));
    assert!(sweep.calinski_harabasz.iter().all(|&s| s >= 0.0));
    assert!(sweep.davies_bouldin.iter().all(|&s| s >= 0.0));
    assert!(svg.contains("<svg"));
}

#[test]
fn import_then_visualize_renders_panels() {
    let dir = synthetic_corpus();
    let mut rng = StdRng::seed_from_u64(1);

    let entries = import::run(dir.path(), 1.0, &mut rng).unwrap();
    let matrix = explore::vectorize(&entries);

    let labels = kmeans_labels(&matrix.to_dense(), 2, 0).unwrap();
    assert_eq!(labels.len(), 12);

    let svg = visualize_3d(&matrix, &labels, "cluster", 2).unwrap();
    assert!(svg.contains("UMAP Clustering (k=2)"));
}

#[test]
fn sampled_import_is_reproducible_with_a_seed() {
    let dir = synthetic_corpus();

    let a = import::run(dir.path(), 0.5, &mut StdRng::seed_from_u64(4)).unwrap();
    let b = import::run(dir.path(), 0.5, &mut StdRng::seed_from_u64(4)).unwrap();

    assert_eq!(a.len(), 6);
    let files_a: Vec<&str> = a.iter().map(|e| e.file.as_str()).collect();
    let files_b: Vec<&str> = b.iter().map(|e| e.file.as_str()).collect();
    assert_eq!(files_a, files_b);
}
