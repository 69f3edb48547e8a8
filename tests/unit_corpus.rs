// Integration tests for the corpus importer: directory listing against real
// (temporary) filesystems, sampling semantics, field extraction with
// sentinels, and the cleaning contract.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use loess::corpus::clean::clean;
use loess::corpus::importer::{list_files, sample};
use loess::corpus::record::{extract_record, NO_ABSTRACT, NO_TITLE};
use loess::error::Error;

fn award_xml(title: &str, abstract_text: &str) -> String {
    format!(
        "<rootTag><Award><AwardTitle>{title}</AwardTitle>\
         <AbstractNarration>{abstract_text}</AbstractNarration></Award></rootTag>"
    )
}

// ============================================================
// list_files
// ============================================================

#[test]
fn list_files_missing_directory() {
    let err = list_files(Path::new("/no/such/corpus")).unwrap_err();
    assert!(matches!(err, Error::DirectoryNotFound(_)));
}

#[test]
fn list_files_returns_exactly_the_regular_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.xml"), award_xml("A", "first")).unwrap();
    fs::write(dir.path().join("b.xml"), award_xml("B", "second")).unwrap();
    fs::write(dir.path().join("c.txt"), "plain text").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("d.xml"), award_xml("D", "deep")).unwrap();

    let files = list_files(dir.path()).unwrap();

    // Subdirectories and their contents excluded; no extension filtering;
    // sorted by name
    assert_eq!(files, vec!["a.xml", "b.xml", "c.txt"]);
}

#[test]
fn list_files_empty_directory_is_empty_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(list_files(dir.path()).unwrap().is_empty());
}

// ============================================================
// sample
// ============================================================

#[test]
fn sample_discards_the_remainder() {
    let list: Vec<String> = (0..7).map(|i| format!("{i}.xml")).collect();
    let mut rng = StdRng::seed_from_u64(9);
    // floor(7 * 0.8) = 5
    assert_eq!(sample(&list, 0.8, &mut rng).unwrap().len(), 5);
}

#[test]
fn sample_empty_list_yields_empty_sample() {
    let mut rng = StdRng::seed_from_u64(9);
    assert!(sample(&[], 0.8, &mut rng).unwrap().is_empty());
}

// ============================================================
// extract_record
// ============================================================

#[test]
fn extract_record_full_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("award.xml");
    fs::write(&path, award_xml("Collaborative Research", "We study rivers.")).unwrap();

    let record = extract_record(&path).unwrap();
    assert_eq!(record.title, "Collaborative Research");
    assert_eq!(record.abstract_text, "We study rivers.");
}

#[test]
fn extract_record_missing_abstract_gets_sentinel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("award.xml");
    fs::write(
        &path,
        "<Award><AwardTitle>Title Only</AwardTitle></Award>",
    )
    .unwrap();

    let record = extract_record(&path).unwrap();
    assert_eq!(record.title, "Title Only");
    assert_eq!(record.abstract_text, NO_ABSTRACT);
}

#[test]
fn extract_record_missing_title_gets_sentinel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("award.xml");
    fs::write(
        &path,
        "<Award><AbstractNarration>Only narration.</AbstractNarration></Award>",
    )
    .unwrap();

    let record = extract_record(&path).unwrap();
    assert_eq!(record.title, NO_TITLE);
    assert_eq!(record.abstract_text, "Only narration.");
}

#[test]
fn extract_record_non_xml_file_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("c.txt");
    fs::write(&path, "just some notes").unwrap();

    let err = extract_record(&path).unwrap_err();
    assert!(matches!(err, Error::MalformedDocument { .. }));
}

// ============================================================
// clean
// ============================================================

#[test]
fn clean_round_trip_example() {
    assert_eq!(clean("<p>Award Title: 2024!!</p>"), "award title");
}

#[test]
fn clean_is_idempotent_over_extracted_abstracts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("award.xml");
    fs::write(
        &path,
        award_xml(
            "T",
            "&lt;p&gt;This award funds 3 projects &amp; 2 sites!&lt;/p&gt;",
        ),
    )
    .unwrap();

    let record = extract_record(&path).unwrap();
    let once = clean(&record.abstract_text);
    assert_eq!(once, "this award funds projects sites");
    assert_eq!(clean(&once), once);
}
